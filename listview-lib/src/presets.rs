//! Table configurations and columns of the admin panel's list screens.
//!
//! Each resource has a `*_config()` and a `*_columns()` pair. The status
//! predicates are also exposed by name through [`registry`] for configuration
//! documents.

use chrono::DateTime;
use chrono::Utc;

use crate::config::TableConfig;
use crate::model::Record;
use crate::model::Value;
use crate::query::FilterDescriptor;
use crate::query::FilterOption;
use crate::query::Predicate;
use crate::query::PredicateRegistry;
use crate::query::SortConfig;
use crate::render::Column;
use crate::render::Columns;

/// Names accepted by [`by_name`].
pub const PRESET_NAMES: [&str; 5] = ["posts", "contacts", "banners", "users", "roles"];

/// Returns the configuration and columns of a named preset.
pub fn by_name(name: &str) -> Option<(TableConfig, Columns)> {
    match name {
        "posts" => Some((posts_config(), posts_columns())),
        "contacts" => Some((contacts_config(), contacts_columns())),
        "banners" => Some((banners_config(), banners_columns())),
        "users" => Some((users_config(), users_columns())),
        "roles" => Some((roles_config(), roles_columns())),
        _ => None,
    }
}

/// Registry of the built-in named predicates.
pub fn registry() -> PredicateRegistry {
    PredicateRegistry::new()
        .with("post_status", Predicate::new(|r, v| post_status(r, v, Utc::now())))
        .with("banner_status", Predicate::new(|r, v| banner_status(r, v, Utc::now())))
        .with("user_role", Predicate::new(user_role))
        .with("role_permission", Predicate::new(role_permission))
}

fn timestamp(record: &Record, field: &str) -> Option<DateTime<Utc>> {
    record.get_datetime(field).ok().flatten()
}

fn status_options(statuses: &[(&str, &str)]) -> Vec<FilterOption> {
    std::iter::once(FilterOption::new("all", "All"))
        .chain(statuses.iter().map(|(v, l)| FilterOption::new(*v, *l)))
        .collect()
}

fn flag(record: &Record, field: &str, yes: &str, no: &str) -> String {
    let label = if record.is_falsy(field) { no } else { yes };
    label.to_string()
}

fn text(record: &Record, field: &str) -> String {
    record.get(field).map(Value::to_string).unwrap_or_default()
}

/// A name entry: either a plain string or an object with a `name` field.
fn entry_name(entry: &Value) -> Option<&str> {
    match entry {
        Value::String(name) => Some(name.as_str()),
        Value::Record(entry) => entry.get_string("name").ok().flatten(),
        _ => None,
    }
}

fn entry_names(entries: &[Value]) -> String {
    entries
        .iter()
        .map(|entry| entry_name(entry).map(str::to_string).unwrap_or_else(|| entry.to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Posts
// =============================================================================

/// Matches a post against `all`, `draft`, `scheduled` or `published` at `now`.
///
/// Unrecognized values match every post.
pub fn post_status(post: &Record, value: &str, now: DateTime<Utc>) -> bool {
    let published_at = timestamp(post, "published_at");
    match value {
        "draft" => post.is_falsy("is_published") && post.is_falsy("published_at"),
        "scheduled" => published_at.is_some_and(|at| at > now),
        "published" => !post.is_falsy("is_published") && published_at.is_none_or(|at| at <= now),
        _ => true,
    }
}

fn post_status_label(post: &Record, now: DateTime<Utc>) -> &'static str {
    if post_status(post, "scheduled", now) {
        "Scheduled"
    } else if post_status(post, "published", now) {
        "Published"
    } else {
        "Draft"
    }
}

/// Posts list filtered by publication status and featured flag.
pub fn posts_config() -> TableConfig {
    TableConfig::builder()
        .filter(FilterDescriptor::search("search", "Search").with_placeholder("Search posts..."))
        .filter(
            FilterDescriptor::custom("status", "Status", |post, value| post_status(post, value, Utc::now()))
                .with_options(status_options(&[
                    ("published", "Published"),
                    ("draft", "Draft"),
                    ("scheduled", "Scheduled"),
                ]))
                .with_default("all"),
        )
        .filter(FilterDescriptor::boolean("is_featured", "Featured"))
        .filter(FilterDescriptor::date("created_at", "Created"))
        .sort_option("created_at", "Created")
        .sort_option("published_at", "Published")
        .sort_option("title", "Title")
        .sort_option("views", "Views")
        .default_sort(SortConfig::desc("created_at"))
        .search_fields(["title", "excerpt", "slug"])
        .build()
        .expect("posts preset is valid")
}

/// Posts list columns. Status is derived from the publication fields.
pub fn posts_columns() -> Columns {
    Columns::new([
        Column::new("title", "Title"),
        Column::new("status", "Status").with_render(|post| post_status_label(post, Utc::now()).to_string()),
        Column::new("is_featured", "Featured").with_render(|post| flag(post, "is_featured", "Yes", "")),
        Column::new("views", "Views"),
        Column::new("created_at", "Created"),
    ])
    .expect("posts columns are unique")
}

// =============================================================================
// Contacts
// =============================================================================

/// Contact messages list: search and a plain status select.
pub fn contacts_config() -> TableConfig {
    TableConfig::builder()
        .filter(FilterDescriptor::search("search", "Search").with_placeholder("Search by name, email or subject..."))
        .filter(
            FilterDescriptor::select(
                "status",
                "Status",
                status_options(&[
                    ("new", "New"),
                    ("read", "Read"),
                    ("replied", "Replied"),
                    ("archived", "Archived"),
                ]),
            )
            .with_default("all"),
        )
        .filter(FilterDescriptor::date("created_at", "Received"))
        .sort_option("created_at", "Received")
        .sort_option("name", "Name")
        .default_sort(SortConfig::desc("created_at"))
        .search_fields(["name", "email", "subject"])
        .build()
        .expect("contacts preset is valid")
}

/// Contact messages list columns.
pub fn contacts_columns() -> Columns {
    Columns::new([
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("subject", "Subject"),
        Column::new("status", "Status"),
        Column::new("created_at", "Received"),
    ])
    .expect("contacts columns are unique")
}

// =============================================================================
// Banners
// =============================================================================

/// Matches a banner against `all`, `active`, `scheduled`, `expired` or
/// `inactive` at `now`.
///
/// Unrecognized values match every banner.
pub fn banner_status(banner: &Record, value: &str, now: DateTime<Utc>) -> bool {
    let starts = timestamp(banner, "start_date");
    let ends = timestamp(banner, "end_date");
    let started = starts.is_none_or(|at| at <= now);
    let ended = ends.is_some_and(|at| at < now);
    match value {
        "active" => !banner.is_falsy("is_active") && started && !ended,
        "scheduled" => !started,
        "expired" => ended,
        "inactive" => banner.is_falsy("is_active"),
        _ => true,
    }
}

/// Banners list, ordered by display order.
pub fn banners_config() -> TableConfig {
    TableConfig::builder()
        .filter(FilterDescriptor::search("title", "Title").with_placeholder("Search banners..."))
        .filter(FilterDescriptor::select(
            "position",
            "Position",
            status_options(&[("hero", "Hero"), ("sidebar", "Sidebar"), ("footer", "Footer")]),
        ))
        .filter(
            FilterDescriptor::custom("status", "Status", |banner, value| banner_status(banner, value, Utc::now()))
                .with_options(status_options(&[
                    ("active", "Active"),
                    ("scheduled", "Scheduled"),
                    ("expired", "Expired"),
                    ("inactive", "Inactive"),
                ])),
        )
        .sort_option("display_order", "Order")
        .sort_option("title", "Title")
        .sort_option("created_at", "Created")
        .default_sort(SortConfig::asc("display_order"))
        .build()
        .expect("banners preset is valid")
}

/// Banners list columns, with the start and end dates shown as one period.
pub fn banners_columns() -> Columns {
    Columns::new([
        Column::new("display_order", "#"),
        Column::new("title", "Title"),
        Column::new("position", "Position"),
        Column::new("is_active", "Active").with_render(|banner| flag(banner, "is_active", "Yes", "No")),
        Column::new("period", "Period").with_render(|banner| {
            format!("{} - {}", text(banner, "start_date"), text(banner, "end_date"))
        }),
    ])
    .expect("banners columns are unique")
}

// =============================================================================
// Users
// =============================================================================

/// Matches a user holding the role `value`; `all` matches everyone.
///
/// Roles may be a list of names, a list of `{ "name": ... }` objects, or a
/// single `role` string.
pub fn user_role(user: &Record, value: &str) -> bool {
    if value == "all" {
        return true;
    }
    let is_role = |role: &Value| entry_name(role) == Some(value);
    match user.get("roles") {
        Some(Value::List(roles)) => roles.iter().any(is_role),
        _ => user.get("role").is_some_and(is_role),
    }
}

fn role_names(user: &Record) -> String {
    match user.get("roles") {
        Some(Value::List(roles)) => entry_names(roles),
        _ => text(user, "role"),
    }
}

/// Users list: search, role and active flag.
pub fn users_config() -> TableConfig {
    TableConfig::builder()
        .filter(FilterDescriptor::search("search", "Search").with_placeholder("Search by name or email..."))
        .filter(
            FilterDescriptor::custom("role", "Role", user_role)
                .with_options(status_options(&[("admin", "Admin"), ("editor", "Editor"), ("viewer", "Viewer")]))
                .with_default("all"),
        )
        .filter(FilterDescriptor::boolean("is_active", "Active"))
        .sort_option("name", "Name")
        .sort_option("created_at", "Created")
        .sort_option("last_login_at", "Last login")
        .default_sort(SortConfig::asc("name"))
        .search_fields(["name", "email"])
        .build()
        .expect("users preset is valid")
}

/// Users list columns.
pub fn users_columns() -> Columns {
    Columns::new([
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("roles", "Roles").with_render(role_names),
        Column::new("is_active", "Active").with_render(|user| flag(user, "is_active", "Yes", "No")),
        Column::new("last_login_at", "Last login"),
    ])
    .expect("users columns are unique")
}

// =============================================================================
// Roles
// =============================================================================

/// Matches a role granting the permission `value`; `all` matches every role.
///
/// Permissions may be names or `{ "name": ... }` objects.
pub fn role_permission(role: &Record, value: &str) -> bool {
    if value == "all" {
        return true;
    }
    match role.get("permissions") {
        Some(Value::List(permissions)) => permissions.iter().any(|p| entry_name(p) == Some(value)),
        _ => false,
    }
}

/// Roles list: search and permission.
pub fn roles_config() -> TableConfig {
    TableConfig::builder()
        .filter(FilterDescriptor::search("search", "Search").with_placeholder("Search roles..."))
        .filter(
            FilterDescriptor::custom("permission", "Permission", role_permission)
                .with_options(status_options(&[
                    ("posts.manage", "Posts"),
                    ("banners.manage", "Banners"),
                    ("contacts.manage", "Contacts"),
                    ("users.manage", "Users"),
                ]))
                .with_default("all"),
        )
        .sort_option("name", "Name")
        .sort_option("users_count", "Users")
        .sort_option("created_at", "Created")
        .default_sort(SortConfig::asc("name"))
        .search_fields(["name", "description"])
        .build()
        .expect("roles preset is valid")
}

/// Roles list columns.
pub fn roles_columns() -> Columns {
    Columns::new([
        Column::new("name", "Name"),
        Column::new("description", "Description"),
        Column::new("permissions", "Permissions").with_render(|role| match role.get("permissions") {
            Some(Value::List(permissions)) => entry_names(permissions),
            _ => String::new(),
        }),
        Column::new("users_count", "Users"),
        Column::new("created_at", "Created"),
    ])
    .expect("roles columns are unique")
}
