/// One navigation entry of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub hotkey: char,
}

pub const BOOKING: &str = "/dashboard";
pub const MARKETPLACE: &str = "/dashboard/marketplace";
pub const MY_TICKETS: &str = "/dashboard/mytickets";
pub const SELL_TICKET: &str = "/dashboard/sellticket";

/// Ordered route list shared by the sidebar, the overlay menu and the header.
pub const ROUTES: &[Route] = &[
    Route {
        path: BOOKING,
        label: "Book Tickets",
        icon: "\u{2302}",
        hotkey: '1',
    },
    Route {
        path: MARKETPLACE,
        label: "Ticket Marketplace",
        icon: "\u{263a}",
        hotkey: '2',
    },
    Route {
        path: MY_TICKETS,
        label: "My tickets",
        icon: "\u{2713}",
        hotkey: '3',
    },
    Route {
        path: SELL_TICKET,
        label: "Sell ticket",
        icon: "\u{2699}",
        hotkey: '4',
    },
];

impl Route {
    /// Exact path lookup; `/dashboard/` or `/dashboard/x` do not match anything.
    pub fn find(path: &str) -> Option<&'static Route> {
        ROUTES.iter().find(|r| r.path == path)
    }

    pub fn by_hotkey(key: char) -> Option<&'static Route> {
        ROUTES.iter().find(|r| r.hotkey == key)
    }
}

/// Index of the entry whose path equals `current` exactly.
pub fn active_index(current: &str) -> Option<usize> {
    ROUTES.iter().position(|r| r.path == current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_order() {
        let paths: Vec<&str> = ROUTES.iter().map(|r| r.path).collect();
        assert_eq!(paths, vec![BOOKING, MARKETPLACE, MY_TICKETS, SELL_TICKET]);
    }

    #[test]
    fn test_active_is_exact_match() {
        assert_eq!(active_index("/dashboard"), Some(0));
        assert_eq!(active_index("/dashboard/mytickets"), Some(2));
        // /dashboard is a prefix of every route but only matches itself
        assert_eq!(active_index("/dashboard/"), None);
        assert_eq!(active_index("/dashboard/marketplace/extra"), None);
        assert_eq!(active_index("/dash"), None);
    }

    #[test]
    fn test_find_and_hotkeys() {
        assert_eq!(Route::find(SELL_TICKET).unwrap().label, "Sell ticket");
        assert!(Route::find("/DASHBOARD").is_none());
        assert_eq!(Route::by_hotkey('2').unwrap().path, MARKETPLACE);
        assert!(Route::by_hotkey('9').is_none());
    }

    #[test]
    fn test_hotkeys_unique() {
        let mut keys: Vec<char> = ROUTES.iter().map(|r| r.hotkey).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), ROUTES.len());
    }
}
