//! ISP-based exposure heuristic.

use super::types::ConnectionStatus;

/// Organization keywords that suggest traffic leaves through a VPN, proxy or
/// hosting network rather than the user's own access provider.
pub const MASKING_KEYWORDS: &[&str] = &["vpn", "proxy", "hosting", "datacenter", "cloud"];

/// Classifies a connection from the organization string reported by the
/// geolocation service.
///
/// This is best-effort substring matching on free text, not network analysis:
/// a VPN whose operator is registered under a neutral name is reported as
/// [`ConnectionStatus::Exposed`], and an ISP with "cloud" in its name is
/// reported as [`ConnectionStatus::Secure`]. A missing organization is
/// treated as exposed.
pub fn classify_exposure(org: Option<&str>) -> ConnectionStatus {
    let Some(org) = org else {
        return ConnectionStatus::Exposed;
    };
    let org = org.to_lowercase();
    if MASKING_KEYWORDS.iter().any(|keyword| org.contains(keyword)) {
        ConnectionStatus::Secure
    } else {
        ConnectionStatus::Exposed
    }
}
