pub const MENU_ICON_OPEN: &str = "fas fa-times";
pub const MENU_ICON_CLOSED: &str = "fas fa-bars";

pub fn nav_target(section_id: &str) -> String {
    format!("#{section_id}")
}

pub fn is_active_entry(href: Option<&str>, section_id: &str) -> bool {
    href.is_some_and(|href| href == nav_target(section_id))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuChange {
    pub open: bool,
    pub icon: &'static str,
    pub freeze_body_scroll: bool,
}

impl MenuChange {
    fn for_state(open: bool) -> Self {
        Self {
            open,
            icon: if open { MENU_ICON_OPEN } else { MENU_ICON_CLOSED },
            freeze_body_scroll: open,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> MenuChange {
        self.open = !self.open;
        MenuChange::for_state(self.open)
    }

    pub fn close(&mut self) -> Option<MenuChange> {
        if !self.open {
            return None;
        }

        self.open = false;
        Some(MenuChange::for_state(false))
    }
}

pub fn same_page_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn scroll_target_offset(target_top: f64, scroll_y: f64, header_height: f64) -> f64 {
    target_top + scroll_y - header_height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_requires_exact_fragment_match() {
        assert!(is_active_entry(Some("#services"), "services"));
        assert!(!is_active_entry(Some("#service"), "services"));
        assert!(!is_active_entry(Some("/#services"), "services"));
        assert!(!is_active_entry(Some("#services-extra"), "services"));
        assert!(!is_active_entry(None, "services"));
    }

    #[test]
    fn highlight_is_consistent_with_last_signal() {
        let hrefs = ["#home", "#services", "#portfolio", "#services"];

        for section in ["home", "services", "contact"] {
            let active: Vec<usize> = hrefs
                .iter()
                .enumerate()
                .filter(|(_, href)| is_active_entry(Some(**href), section))
                .map(|(index, _)| index)
                .collect();
            let expected: Vec<usize> = hrefs
                .iter()
                .enumerate()
                .filter(|(_, href)| **href == format!("#{section}"))
                .map(|(index, _)| index)
                .collect();
            assert_eq!(active, expected);
        }
    }

    #[test]
    fn toggle_swaps_icon_and_scroll_lock() {
        let mut menu = MenuState::default();

        let opened = menu.toggle();
        assert!(opened.open);
        assert_eq!(opened.icon, MENU_ICON_OPEN);
        assert!(opened.freeze_body_scroll);

        let closed = menu.toggle();
        assert!(!closed.open);
        assert_eq!(closed.icon, MENU_ICON_CLOSED);
        assert!(!closed.freeze_body_scroll);
    }

    #[test]
    fn double_close_is_idempotent() {
        let mut menu = MenuState::default();
        menu.toggle();

        assert!(menu.close().is_some());
        assert!(menu.close().is_none());
        assert!(!menu.is_open());
    }

    #[test]
    fn bare_hash_has_no_target() {
        assert_eq!(same_page_target("#"), None);
        assert_eq!(same_page_target("#contact"), Some("contact"));
        assert_eq!(same_page_target("https://wa.me/55"), None);
    }

    #[test]
    fn scroll_offset_subtracts_header() {
        assert_eq!(scroll_target_offset(250.0, 1_000.0, 80.0), 1_170.0);
    }
}
