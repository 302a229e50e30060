// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let mut content = String::new();
    for section in 0..size {
        content.push_str(&format!("# Section {section}\n\n"));
        content.push_str(
            "Paragraph with *some* content that repeats, so quotes have several near misses.\n\n",
        );
        content.push_str(&format!("- Bullet point {section}\n- Another item\n\n"));
    }
    content
}

/// Plain text of `len` characters from a small alphabet.
#[allow(dead_code)]
pub fn generate_text(len: usize) -> String {
    let alphabet = b"abcdefgh ";
    let mut state: u32 = 0x9e37_79b9;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            alphabet[(state >> 24) as usize % alphabet.len()] as char
        })
        .collect()
}
