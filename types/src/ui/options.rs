/// Accessibility and rendering preferences read from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    /// Animations complete instantly.
    pub reduced_motion: bool,
}
