//! Outbound message templates.

/// Sent when an inbound reply is neither yes nor no.
pub const INVALID_REPLY: &str = "Please reply YES or NO";

/// Initial ask to serve.
pub fn invitation(name: &str, date: &str, time: &str, window_hours: i64) -> String {
    format!(
        "Hi {}! You're scheduled to bless the sacrament this Sunday, {} at {}. \
         Can you make it? Reply YES or NO. \
         (If we don't hear from you in {} hours, we'll ask someone else.)",
        name, date, time, window_hours
    )
}

/// Acknowledges a yes.
pub fn confirmation(name: &str) -> String {
    format!(
        "Thanks {}! You're confirmed for Sunday. We'll send a reminder Saturday.",
        name
    )
}

/// Acknowledges a no to an invitation.
pub fn decline(name: &str) -> String {
    format!("No problem, {}. Thanks for letting us know!", name)
}

/// Acknowledges a no to a check-in from someone already confirmed.
pub fn retraction(name: &str) -> String {
    format!(
        "Thanks for letting us know, {}. You're off the schedule for Sunday and we'll find someone else.",
        name
    )
}

/// Midweek re-confirmation request.
pub fn checkin(name: &str, time: &str) -> String {
    format!(
        "Hi {}, just checking in - still good for blessing the sacrament Sunday at {}? \
         Reply YES to confirm or NO if plans changed.",
        name, time
    )
}

/// Day-before reminder naming the rest of the crew.
pub fn final_reminder(date: &str, time: &str, others: &[&str]) -> String {
    if others.is_empty() {
        format!(
            "Reminder: Tomorrow (Sunday {}) you're blessing the sacrament at {}. See you there!",
            date, time
        )
    } else {
        format!(
            "Reminder: Tomorrow (Sunday {}) you're blessing the sacrament at {} with {}. See you there!",
            date,
            time,
            others.join(" and ")
        )
    }
}
