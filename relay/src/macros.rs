/// Creates a single [`HistoryEntry`](crate::HistoryEntry) from a role shorthand.
///
/// ```rust
/// use relay::{Role, relay_entry};
///
/// let entry = relay_entry!(assistant => "Done.");
/// assert_eq!(entry.role, Role::Assistant);
/// assert_eq!(entry.content[0].as_text(), Some("Done."));
/// ```
#[macro_export]
macro_rules! relay_entry {
    (system => $content:expr $(,)?) => {
        $crate::HistoryEntry::text($crate::Role::System, $content)
    };
    (user => $content:expr $(,)?) => {
        $crate::HistoryEntry::text($crate::Role::User, $content)
    };
    (assistant => $content:expr $(,)?) => {
        $crate::HistoryEntry::text($crate::Role::Assistant, $content)
    };
    ($role:ident => $content:expr $(,)?) => {
        compile_error!("unsupported role: use system, user, or assistant");
    };
}

/// Creates a `Vec<HistoryEntry>` from role/content pairs, ready to replay.
///
/// ```rust
/// use relay::{Role, relay_history};
///
/// let history = relay_history![
///     user => "What is 6 x 7?",
///     assistant => "42",
/// ];
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history[0].role, Role::User);
/// assert_eq!(history[1].role, Role::Assistant);
/// ```
#[macro_export]
macro_rules! relay_history {
    () => {
        Vec::<$crate::HistoryEntry>::new()
    };
    ($($role:ident => $content:expr),+ $(,)?) => {
        vec![$($crate::relay_entry!($role => $content)),+]
    };
}
