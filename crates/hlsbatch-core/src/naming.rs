//! Output filename derivation from input file names.

/// Strips the trailing extension from `name`.
///
/// The extension is everything from the last `.` on, unless only dots precede
/// that `.` (so `.hidden` and `..txt` are kept whole).
pub fn strip_extension(name: &str) -> &str {
    let leading_dots = name.len() - name.trim_start_matches('.').len();
    match name[leading_dots..].rfind('.') {
        Some(i) => &name[..leading_dots + i],
        None => name,
    }
}

/// Builds the output filename for an input file name.
///
/// `__` becomes a space first, then any remaining `_` does; runs of three or
/// more underscores therefore come out as mixed spacing. The result is not
/// checked against filesystem rules.
///
/// `output_filename("My__Show_Episode_01.txt", "mp4")` → `"My Show Episode 01.mp4"`
pub fn output_filename(input_name: &str, extension: &str) -> String {
    let base = strip_extension(input_name)
        .replace("__", " ")
        .replace('_', " ");
    format!("{base}.{extension}")
}
