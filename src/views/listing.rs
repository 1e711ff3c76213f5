//! Public casting list
//!
//! `Loading -> Loaded | Failed`. Cards are shown in server order; selecting
//! one opens the apply modal for that casting.

use crate::models::{Casting, CastingStatus};
use crate::views::{ListState, LoadState, Loader, Ticket};

/// Status badge styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Affirmative,
    Negative,
}

impl Badge {
    pub fn for_status(status: &CastingStatus) -> Self {
        if status.is_open() {
            Badge::Affirmative
        } else {
            Badge::Negative
        }
    }
}

/// Display data for one casting card
#[derive(Debug, Clone, PartialEq)]
pub struct Card<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub requirements: &'a [String],
    pub deadline: String,
    pub external_link: Option<&'a str>,
    pub status: &'a CastingStatus,
    pub badge: Badge,
}

impl<'a> Card<'a> {
    pub fn from_casting(casting: &'a Casting) -> Self {
        Card {
            title: &casting.title,
            description: &casting.description,
            requirements: &casting.requirements,
            deadline: casting.format_deadline(),
            external_link: casting.external_link.as_deref(),
            status: &casting.status,
            badge: Badge::for_status(&casting.status),
        }
    }
}

/// Casting list view state
#[derive(Debug, Clone, Default)]
pub struct ListingView {
    pub loader: Loader<Vec<Casting>>,
    pub list: ListState,
}

impl ListingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState<Vec<Casting>> {
        &self.loader.state
    }

    /// Enter `Loading`; the caller issues the fetch with the ticket
    pub fn begin_load(&mut self) -> Ticket {
        self.loader.begin()
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<Casting>, String>) {
        if self.loader.finish(ticket, result) {
            let len = self.castings().len();
            self.list.set_len(len);
        }
    }

    /// Loaded castings, empty while loading or failed
    pub fn castings(&self) -> &[Casting] {
        self.loader.state.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    /// One card per casting, in server order
    pub fn cards(&self) -> Vec<Card<'_>> {
        self.castings().iter().map(Card::from_casting).collect()
    }

    pub fn selected(&self) -> Option<&Casting> {
        self.castings().get(self.list.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CastingId;
    use chrono::NaiveDate;

    fn casting(id: u64, title: &str, status: CastingStatus) -> Casting {
        Casting {
            id: CastingId::Number(id),
            title: title.into(),
            description: format!("{} description", title),
            requirements: vec!["Reliable".into()],
            external_link: None,
            deadline: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            status,
        }
    }

    #[test]
    fn test_cards_follow_server_order_and_badges() {
        let mut view = ListingView::new();
        let ticket = view.begin_load();
        assert!(view.state().is_loading());
        assert!(view.cards().is_empty());

        view.finish_load(
            ticket,
            Ok(vec![
                casting(3, "Zeta", CastingStatus::Open),
                casting(1, "Alpha", CastingStatus::Closed),
                casting(2, "Mid", CastingStatus::Other("archived".into())),
            ]),
        );

        let cards = view.cards();
        let titles: Vec<_> = cards.iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(cards[0].badge, Badge::Affirmative);
        assert_eq!(cards[1].badge, Badge::Negative);
        assert_eq!(cards[2].badge, Badge::Negative);
        assert_eq!(cards[0].deadline, "January 1, 2025");
    }

    #[test]
    fn test_failed_load_keeps_message() {
        let mut view = ListingView::new();
        let ticket = view.begin_load();
        view.finish_load(ticket, Err("Failed to fetch opportunities".into()));
        assert_eq!(view.state().error(), Some("Failed to fetch opportunities"));
        assert!(view.selected().is_none());
    }

    #[test]
    fn test_selection_after_reload_is_clamped() {
        let mut view = ListingView::new();
        let t = view.begin_load();
        view.finish_load(
            t,
            Ok(vec![
                casting(1, "A", CastingStatus::Open),
                casting(2, "B", CastingStatus::Open),
            ]),
        );
        view.list.down();
        assert_eq!(view.selected().map(|c| c.title.as_str()), Some("B"));

        let t = view.begin_load();
        view.finish_load(t, Ok(vec![casting(1, "A", CastingStatus::Open)]));
        assert_eq!(view.selected().map(|c| c.title.as_str()), Some("A"));
    }
}
