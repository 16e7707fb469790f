//! Plain-text rendering of mailbox data

use mail::{MessageDetail, MessageSummary, NO_EMAILS};

pub const HELP: &str = "\
Commands:
  login <email> [password]   sign in
  list | refresh             reload the inbox
  search <text or address>   filter by subject, or by sender if it contains @
  open <n>                   show message n from the last listing
  compose                    start a new message
  to/subject/body <text>     fill in the draft
  send                       send the draft
  back                       return to the inbox
  help | quit";

/// One line per summary, numbered from 1; unread messages are starred
pub fn summaries(list: &[MessageSummary]) -> String {
    if list.is_empty() {
        return NO_EMAILS.to_string();
    }

    list.iter()
        .enumerate()
        .map(|(i, summary)| {
            format!(
                "{:>3} {} {:<28} {:<32} {:>6}\n      {}",
                i + 1,
                if summary.is_read { ' ' } else { '*' },
                summary.from,
                summary.display_subject(),
                summary.short_date(),
                summary.preview(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn detail(message: &MessageDetail) -> String {
    format!(
        "Subject: {}\nFrom:    {}\nTo:      {}\nDate:    {}\n\n{}",
        message.display_subject(),
        message.from,
        message.to,
        message.formatted_timestamp(),
        message.body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mail::MessageId;

    fn summary(subject: &str, is_read: bool) -> MessageSummary {
        MessageSummary {
            id: MessageId::new("1"),
            from: "ann@example.com".into(),
            subject: subject.into(),
            body_preview: "hello".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).unwrap(),
            is_read,
        }
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(summaries(&[]), NO_EMAILS);
    }

    #[test]
    fn test_unread_marker_and_placeholder_subject() {
        let out = summaries(&[summary("", false), summary("Lunch", true)]);
        let lines: Vec<_> = out.lines().collect();

        assert!(lines[0].starts_with("  1 *"));
        assert!(lines[0].contains("(No Subject)"));
        assert!(lines[2].starts_with("  2  "));
        assert!(lines[2].contains("Lunch"));
    }
}
