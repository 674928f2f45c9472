//! Plain-text rendering of registry state.
//!
//! Renders an exported [`Snapshot`] section by section for the runner's
//! state echo and the `show` command. Credentials are never printed.

use std::fmt::Write;

use warden_access::Snapshot;

/// Render the registered user names.
pub fn render_users(snapshot: &Snapshot) -> String {
    let mut out = String::from("Users:\n");
    if snapshot.users.is_empty() {
        out.push_str("  (none)\n");
    }
    for name in snapshot.users.keys() {
        let _ = writeln!(out, "  {}", name);
    }
    out
}

/// Render the user-groups and their members.
pub fn render_user_groups(snapshot: &Snapshot) -> String {
    render_groups("User groups:", snapshot.user_groups.iter())
}

/// Render the object-groups and their members.
pub fn render_object_groups(snapshot: &Snapshot) -> String {
    render_groups("Object groups:", snapshot.object_groups.iter())
}

fn render_groups<'a, I, M>(header: &str, groups: I) -> String
where
    I: Iterator<Item = (&'a String, M)>,
    M: IntoIterator<Item = &'a String>,
{
    let mut out = String::from(header);
    out.push('\n');
    let mut any = false;
    for (name, members) in groups {
        any = true;
        let members: Vec<&str> = members.into_iter().map(String::as_str).collect();
        let _ = writeln!(out, "  {}: {}", name, members.join(", "));
    }
    if !any {
        out.push_str("  (none)\n");
    }
    out
}

/// Render the access rules per operation.
pub fn render_rules(snapshot: &Snapshot) -> String {
    let mut out = String::from("Access rules:\n");
    if snapshot.rules.is_empty() {
        out.push_str("  (none)\n");
    }
    for (operation, entries) in &snapshot.rules {
        for entry in entries {
            let _ = writeln!(out, "  {}: {}", operation, entry);
        }
    }
    out
}

/// Render all four registries.
pub fn render_all(snapshot: &Snapshot) -> String {
    let mut out = render_users(snapshot);
    out.push_str(&render_user_groups(snapshot));
    out.push_str(&render_object_groups(snapshot));
    out.push_str(&render_rules(snapshot));
    out
}
