//! Issue tracker references in commit subjects.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;

/// Pattern used when none is configured.
pub const DEFAULT_TICKET_PATTERN: &str = r"UF-\d+";

/// Browse URL prefix used when none is configured.
pub const DEFAULT_TICKET_URL: &str = "https://jira.sundsvall.se/browse/";

static DEFAULT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(DEFAULT_TICKET_PATTERN).unwrap());

static TRAILING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)$").unwrap());

/// Compile a ticket pattern, reusing the default regex when possible.
pub fn ticket_regex(pattern: Option<&str>) -> Result<Regex> {
    match pattern {
        None => Ok(DEFAULT_REGEX.clone()),
        Some(p) => Ok(Regex::new(p)?),
    }
}

/// Distinct ticket keys mentioned in `messages`, in ticket order.
///
/// Keys sort by their trailing number (`UF-9` before `UF-10`); keys without
/// one come last, lexically.
pub fn extract_tickets<'a, I>(messages: I, pattern: &Regex) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let found: BTreeSet<&str> = messages
        .into_iter()
        .flat_map(|message| pattern.find_iter(message).map(|m| m.as_str()))
        .collect();

    let mut tickets: Vec<String> = found.into_iter().map(str::to_string).collect();
    tickets.sort_by_cached_key(|ticket| {
        let number = TRAILING_NUMBER
            .captures(ticket)
            .and_then(|caps| caps[1].parse::<u64>().ok());
        (number.is_none(), number, ticket.clone())
    });
    tickets
}

/// Render tickets as a Markdown link list.
pub fn render_markdown(tickets: &[String], url_base: &str) -> String {
    let mut output = String::from("## Jira issues referenced\n\n");
    for ticket in tickets {
        output.push_str(&format!("- [Link to {}]({}{})\n", ticket, url_base, ticket));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_tickets_dedups_and_sorts_numerically() {
        let messages = [
            "UF-10 add endpoint",
            "Merge UF-9 and UF-10",
            "fix typo",
            "UF-123: bump dependencies",
        ];
        let regex = ticket_regex(None).unwrap();

        let tickets = extract_tickets(messages.iter().copied(), &regex);

        assert_eq!(tickets, vec!["UF-9", "UF-10", "UF-123"]);
    }

    #[test]
    fn test_custom_pattern() {
        let regex = ticket_regex(Some(r"[A-Z]+-\d+")).unwrap();
        let tickets = extract_tickets(["API-2 and WEB-1", "API-2 again"], &regex);
        assert_eq!(tickets, vec!["WEB-1", "API-2"]);
    }

    #[test]
    fn test_keys_without_number_sort_last() {
        let regex = ticket_regex(Some(r"#\w+")).unwrap();
        let tickets = extract_tickets(["#wip #12 #3"], &regex);
        assert_eq!(tickets, vec!["#3", "#12", "#wip"]);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(ticket_regex(Some("UF-(")).is_err());
    }

    #[test]
    fn test_render_markdown() {
        let tickets = vec!["UF-1".to_string(), "UF-22".to_string()];
        let markdown = render_markdown(&tickets, DEFAULT_TICKET_URL);

        assert!(markdown.starts_with("## Jira issues referenced\n\n"));
        assert!(markdown.contains("- [Link to UF-1](https://jira.sundsvall.se/browse/UF-1)\n"));
        assert!(markdown.ends_with("(https://jira.sundsvall.se/browse/UF-22)\n"));
    }
}
