//! Link aggregation: every link in a block becomes one tap action.

use serde::Serialize;

use crate::error::HostError;

/// Title of the prompt shown when a block holds several links.
pub const CHOOSE_TITLE: &str = "Open link";
/// Label of the prompt's cancel option.
pub const CHOOSE_CANCEL: &str = "Cancel";

/// A link's visible label and its resolved target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Host services a tap needs: opening URLs and asking the user to pick one.
pub trait LinkHost {
    /// Open `url`, e.g. in the system browser.
    fn navigate(&self, url: &str) -> Result<(), HostError>;

    /// Let the user pick one of `options`; `None` means cancelled.
    fn choose(
        &self,
        title: &str,
        cancel: &str,
        options: &[&str],
    ) -> Result<Option<String>, HostError>;
}

/// Tap handler for one block, holding its own copy of the block's links.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkAction {
    links: Vec<Link>,
}

impl LinkAction {
    /// Aggregate a block's links; `None` when the block has none.
    pub fn from_links(links: Vec<Link>) -> Option<Self> {
        if links.is_empty() {
            None
        } else {
            Some(Self { links })
        }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Handle a tap. Host failures and cancellation are swallowed.
    pub fn activate(&self, host: &dyn LinkHost) {
        if let Err(e) = self.try_activate(host) {
            tracing::debug!(error = %e, "Link activation failed");
        }
    }

    fn try_activate(&self, host: &dyn LinkHost) -> Result<(), HostError> {
        let target = match self.links.as_slice() {
            [] => None,
            [only] => Some(only),
            links => {
                let labels: Vec<&str> = links.iter().map(|link| link.label.as_str()).collect();
                let choice = host.choose(CHOOSE_TITLE, CHOOSE_CANCEL, &labels)?;
                choice.and_then(|label| links.iter().find(|link| link.label == label))
            }
        };

        match target {
            Some(link) => host.navigate(&link.url),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Records navigations; answers prompts with a fixed choice.
    #[derive(Default)]
    pub(crate) struct RecordingHost {
        pub choice: Option<String>,
        pub fail_navigation: bool,
        pub fail_prompt: bool,
        pub prompts: RefCell<Vec<Vec<String>>>,
        pub visited: RefCell<Vec<String>>,
    }

    impl LinkHost for RecordingHost {
        fn navigate(&self, url: &str) -> Result<(), HostError> {
            if self.fail_navigation {
                return Err(HostError::Navigation {
                    url: url.to_string(),
                    reason: "no browser".to_string(),
                });
            }
            self.visited.borrow_mut().push(url.to_string());
            Ok(())
        }

        fn choose(
            &self,
            title: &str,
            cancel: &str,
            options: &[&str],
        ) -> Result<Option<String>, HostError> {
            assert_eq!(title, CHOOSE_TITLE);
            assert_eq!(cancel, CHOOSE_CANCEL);
            if self.fail_prompt {
                return Err(HostError::Prompt(std::io::Error::other("stdin closed")));
            }
            self.prompts
                .borrow_mut()
                .push(options.iter().map(|s| s.to_string()).collect());
            Ok(self.choice.clone())
        }
    }

    #[test]
    fn no_links_no_action() {
        assert_eq!(LinkAction::from_links(Vec::new()), None);
    }

    #[test]
    fn single_link_navigates_without_prompt() {
        let action = LinkAction::from_links(vec![Link::new("A", "https://a")]).unwrap();
        let host = RecordingHost::default();
        action.activate(&host);
        assert!(host.prompts.borrow().is_empty());
        assert_eq!(*host.visited.borrow(), vec!["https://a".to_string()]);
    }

    #[test]
    fn several_links_prompt_then_navigate_to_choice() {
        let action = LinkAction::from_links(vec![
            Link::new("A", "https://a"),
            Link::new("B", "https://b"),
        ])
        .unwrap();
        let host = RecordingHost {
            choice: Some("B".to_string()),
            ..RecordingHost::default()
        };
        action.activate(&host);
        assert_eq!(
            *host.prompts.borrow(),
            vec![vec!["A".to_string(), "B".to_string()]]
        );
        assert_eq!(*host.visited.borrow(), vec!["https://b".to_string()]);
    }

    #[test]
    fn cancelled_or_unknown_choice_does_nothing() {
        let links = vec![Link::new("A", "https://a"), Link::new("B", "https://b")];
        let action = LinkAction::from_links(links).unwrap();

        let cancelled = RecordingHost::default();
        action.activate(&cancelled);
        assert!(cancelled.visited.borrow().is_empty());

        let unknown = RecordingHost {
            choice: Some("C".to_string()),
            ..RecordingHost::default()
        };
        action.activate(&unknown);
        assert!(unknown.visited.borrow().is_empty());
    }

    #[test]
    fn navigation_failure_is_swallowed() {
        let action = LinkAction::from_links(vec![Link::new("A", "https://a")]).unwrap();
        let host = RecordingHost {
            fail_navigation: true,
            ..RecordingHost::default()
        };
        action.activate(&host);
        assert!(host.visited.borrow().is_empty());
    }

    #[test]
    fn prompt_failure_is_swallowed() {
        let links = vec![Link::new("A", "https://a"), Link::new("B", "https://b")];
        let action = LinkAction::from_links(links).unwrap();
        let host = RecordingHost {
            choice: Some("A".to_string()),
            fail_prompt: true,
            ..RecordingHost::default()
        };
        action.activate(&host);
        assert!(host.visited.borrow().is_empty());
    }
}
