use url::Url;

pub const CTA_SELECTOR: &str = "a.js-whatsapp, button.js-whatsapp, a[href*=\"wa.me\"]";
pub const CTA_SUCCESS_MESSAGE: &str = "Tudo certo! Abrimos o WhatsApp para você.";

// Schemes that would run script in the page or the opened context.
const BLOCKED_SCHEMES: [&str; 3] = ["javascript", "data", "vbscript"];

pub fn raw_target<'a>(
    href: Option<&'a str>,
    data_whatsapp: Option<&'a str>,
    data_href: Option<&'a str>,
) -> Option<&'a str> {
    [href, data_whatsapp, data_href]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
}

pub fn resolve_target(base: Option<&Url>, raw: &str) -> Result<Url, &'static str> {
    let parsed = match Url::parse(raw) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => base
            .ok_or("relative target without page URL")?
            .join(raw)
            .map_err(|_| "unparseable target")?,
        Err(_) => return Err("unparseable target"),
    };

    if BLOCKED_SCHEMES.contains(&parsed.scheme()) {
        return Err("blocked scheme");
    }

    Ok(parsed)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationAttempt {
    NewContext,
    SameContextFallback,
}

impl NavigationAttempt {
    pub fn after_open(opened: bool) -> Self {
        if opened {
            Self::NewContext
        } else {
            Self::SameContextFallback
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CtaClick {
    pub target: Url,
    pub attempt: NavigationAttempt,
    pub toast: &'static str,
}

pub fn handle_click(
    base: Option<&Url>,
    raw: &str,
    open: impl FnOnce(&Url) -> bool,
) -> Result<CtaClick, &'static str> {
    let target = resolve_target(base, raw)?;
    let attempt = NavigationAttempt::after_open(open(&target));

    Ok(CtaClick {
        target,
        attempt,
        toast: CTA_SUCCESS_MESSAGE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_takes_precedence_over_data_attributes() {
        assert_eq!(
            raw_target(Some("https://wa.me/5511"), Some("https://wa.me/1"), None),
            Some("https://wa.me/5511")
        );
        assert_eq!(raw_target(Some("  "), None, Some("https://wa.me/2")), Some("https://wa.me/2"));
        assert_eq!(raw_target(None, None, None), None);
    }

    #[test]
    fn relative_targets_resolve_against_page() {
        let base = Url::parse("https://timeup.example/landing/").expect("valid URL");
        let resolved = resolve_target(Some(&base), "/contato").expect("relative target resolves");
        assert_eq!(resolved.as_str(), "https://timeup.example/contato");
    }

    #[test]
    fn script_urls_are_rejected() {
        assert!(resolve_target(None, "javascript:alert(1)").is_err());
        assert!(resolve_target(None, "data:text/html,<script>alert(1)</script>").is_err());
        assert!(resolve_target(None, "VBScript:msgbox").is_err());
        assert!(resolve_target(None, "/relative").is_err());
    }

    #[test]
    fn app_schemes_are_accepted() {
        let page = Url::parse("https://timeup.example/").expect("valid URL");
        for raw in [
            "tel:+5511999999999",
            "sms:+5511999999999",
            "intent://send/5511#Intent;scheme=whatsapp;end",
        ] {
            let target = raw_target(None, Some(raw), None).expect("non-empty target");
            assert!(resolve_target(Some(&page), target).is_ok(), "{raw} should be accepted");
        }
    }

    #[test]
    fn accepted_click_opens_once_and_toasts_once() {
        let page = Url::parse("https://timeup.example/landing/").expect("valid URL");
        for raw in [
            "https://wa.me/5511999999999",
            "whatsapp://send?phone=5511",
            "tel:+5511999999999",
            "sms:+5511999999999",
            "intent://send/5511#Intent;scheme=whatsapp;end",
            "/contato",
        ] {
            for opened in [true, false] {
                let mut opens = 0;
                let click = handle_click(Some(&page), raw, |_| {
                    opens += 1;
                    opened
                })
                .expect("accepted target");

                assert_eq!(opens, 1, "{raw}");
                assert_eq!(click.toast, CTA_SUCCESS_MESSAGE);
                assert_eq!(click.attempt, NavigationAttempt::after_open(opened));
            }
        }
    }

    #[test]
    fn rejected_click_never_opens() {
        let mut opens = 0;
        let click = handle_click(None, "javascript:alert(1)", |_| {
            opens += 1;
            true
        });

        assert!(click.is_err());
        assert_eq!(opens, 0);
    }

    #[test]
    fn whatsapp_scheme_is_allowed() {
        let resolved = resolve_target(None, "whatsapp://send?phone=5511").expect("allowed");
        assert_eq!(resolved.scheme(), "whatsapp");
    }

    #[test]
    fn each_click_yields_one_navigation_attempt() {
        assert_eq!(NavigationAttempt::after_open(true), NavigationAttempt::NewContext);
        assert_eq!(
            NavigationAttempt::after_open(false),
            NavigationAttempt::SameContextFallback
        );
    }
}
