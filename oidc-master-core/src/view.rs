/// The four presentation views of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Discovery,
    Builder,
    Debugger,
    Assistant,
}

impl View {
    /// All views in navigation order.
    pub const ALL: [View; 4] = [View::Discovery, View::Builder, View::Debugger, View::Assistant];

    /// Stable identifier, used on the command line.
    pub fn id(self) -> &'static str {
        match self {
            View::Discovery => "discovery",
            View::Builder => "builder",
            View::Debugger => "debugger",
            View::Assistant => "assistant",
        }
    }

    /// Navigation label.
    pub fn label(self) -> &'static str {
        match self {
            View::Discovery => "Discovery",
            View::Builder => "Auth Builder",
            View::Debugger => "JWT Debugger",
            View::Assistant => "AI Expert",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string names no known view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownView(pub String);

impl std::fmt::Display for UnknownView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown view: {}", self.0)
    }
}

impl std::error::Error for UnknownView {}

impl std::str::FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        View::ALL
            .into_iter()
            .find(|v| v.id().eq_ignore_ascii_case(needle) || v.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}
