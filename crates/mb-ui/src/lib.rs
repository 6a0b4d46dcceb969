use askama::Template;
use mb_core::models::{ThreadDetail, ThreadSummary};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters that cannot appear raw inside one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encodes a board name for use as a single URL path segment.
pub fn path_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

/// The board page that thread creation redirects to (e.g. /b/general).
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate<'a> {
    pub board: &'a str,
    pub threads: &'a [ThreadSummary],
}

impl BoardTemplate<'_> {
    fn board_path(&self) -> String {
        path_segment(self.board)
    }
}

/// A single thread page (e.g. /b/general/<uuid>).
#[derive(Template)]
#[template(path = "thread.html")]
pub struct ThreadTemplate<'a> {
    pub board: &'a str,
    pub thread: &'a ThreadDetail,
}

impl ThreadTemplate<'_> {
    fn board_path(&self) -> String {
        path_segment(self.board)
    }
}
