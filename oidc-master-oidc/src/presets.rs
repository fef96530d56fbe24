/// A well-known identity provider issuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssuerPreset {
    pub name: &'static str,
    /// Issuer URL; braces mark parts the user must fill in.
    pub url: &'static str,
}

impl IssuerPreset {
    /// Whether the URL still contains a `{placeholder}`.
    pub fn is_template(&self) -> bool {
        self.url.contains('{')
    }
}

pub const PRESETS: [IssuerPreset; 4] = [
    IssuerPreset {
        name: "Google",
        url: "https://accounts.google.com",
    },
    IssuerPreset {
        name: "Auth0",
        url: "https://{your-tenant}.auth0.com",
    },
    IssuerPreset {
        name: "Okta",
        url: "https://{your-org}.okta.com/oauth2/default",
    },
    IssuerPreset {
        name: "Azure AD",
        url: "https://login.microsoftonline.com/{tenant-id}/v2.0",
    },
];

/// Look up a preset by name, ignoring case and spaces (`azuread` finds "Azure AD").
pub fn find_preset(name: &str) -> Option<&'static IssuerPreset> {
    let wanted = normalize(name);
    PRESETS.iter().find(|p| normalize(p.name) == wanted)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_spaces() {
        assert_eq!(find_preset("google").unwrap().url, "https://accounts.google.com");
        assert_eq!(find_preset("AzureAD").unwrap().name, "Azure AD");
        assert!(find_preset("keycloak").is_none());
    }

    #[test]
    fn only_google_is_ready_to_use() {
        let ready: Vec<_> = PRESETS.iter().filter(|p| !p.is_template()).collect();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].name, "Google");
    }
}
