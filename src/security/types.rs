//! Connection status types.

/// Exposure hint shown next to the panel title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionStatus {
    /// A refresh cycle is running
    Detecting,
    /// The ISP looks like a VPN, proxy or hosting provider
    Secure,
    /// The ISP looks like a residential or business access network
    Exposed,
}

impl ConnectionStatus {
    /// Label rendered in the status line
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Detecting => "DETECTING...",
            ConnectionStatus::Secure => "SECURE / MASKED",
            ConnectionStatus::Exposed => "DIRECT EXPOSURE",
        }
    }

    /// Short machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ConnectionStatus::Detecting => "detecting",
            ConnectionStatus::Secure => "secure",
            ConnectionStatus::Exposed => "exposed",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
