// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_talk_page(comments: usize) -> String {
    let base = "== Comment ==\n\nThis looks right to me, but check the edge cases. ~~~~\n\n \
                Agreed, ~~ roughly ~~ as discussed. ~~~\n\n----\n~~~~~~~~\n\n";
    base.repeat(comments)
}

#[allow(dead_code)]
pub fn generate_plain_page(paragraphs: usize) -> String {
    "Paragraph with some content and no signatures at all.\n\n".repeat(paragraphs)
}
