//! Repository selection.
//!
//! Picks the repositories shown on the page: organization-owned projects
//! first (up to a cap), then the account's own projects, each group ordered
//! by most recent update.

use crate::listing::RepositorySummary;
use std::collections::HashSet;
use tracing::debug;

/// Rules for choosing which repositories are rendered.
#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    max_projects: usize,
    organization_cap: usize,
    excluded: HashSet<String>,
}

impl SelectionPolicy {
    /// Creates a policy selecting at most `max_projects` repositories, of which
    /// at most `organization_cap` are organization-owned.
    #[must_use]
    pub fn new(max_projects: usize, organization_cap: usize) -> Self {
        Self {
            max_projects,
            organization_cap,
            excluded: HashSet::new(),
        }
    }

    /// Excludes repositories by `name` or `owner/name` (case-insensitive).
    #[must_use]
    pub fn with_excluded<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded
            .extend(names.into_iter().map(|n| n.as_ref().to_lowercase()));
        self
    }

    /// Returns the maximum number of selected repositories.
    #[must_use]
    pub fn max_projects(&self) -> usize {
        self.max_projects
    }

    /// Returns the maximum number of organization-owned repositories.
    #[must_use]
    pub fn organization_cap(&self) -> usize {
        self.organization_cap
    }

    /// Returns true if the repository may appear on the page at all.
    ///
    /// Forks, repositories without a description, and excluded names never do.
    #[must_use]
    pub fn is_eligible(&self, repository: &RepositorySummary) -> bool {
        !repository.is_fork
            && repository.description_text().is_some()
            && !self.is_excluded(repository)
    }

    fn is_excluded(&self, repository: &RepositorySummary) -> bool {
        self.excluded.contains(&repository.name.to_lowercase())
            || self
                .excluded
                .contains(&repository.full_name.to_lowercase())
    }

    /// Selects the repositories to render, in display order.
    ///
    /// The organization cap is hard: when user repositories run out, the
    /// remaining slots stay empty instead of taking more organization
    /// repositories. Three organization and one user repository with a cap of
    /// two therefore yield three entries, not four.
    ///
    /// Ties on `updated_at` keep the order of `repositories`.
    #[must_use]
    pub fn select(&self, repositories: &[RepositorySummary]) -> Vec<RepositorySummary> {
        let (mut organizations, mut users): (Vec<_>, Vec<_>) = repositories
            .iter()
            .filter(|r| self.is_eligible(r))
            .partition(|r| r.is_organization_owned());

        // `sort_by` is stable.
        organizations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        users.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        let organization_slots = self.organization_cap.min(self.max_projects);
        let selected: Vec<RepositorySummary> = organizations
            .into_iter()
            .take(organization_slots)
            .chain(users)
            .take(self.max_projects)
            .cloned()
            .collect();

        debug!(
            eligible = repositories.iter().filter(|r| self.is_eligible(r)).count(),
            selected = selected.len(),
            "Selected repositories"
        );
        selected
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::new(4, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::OwnerKind;
    use chrono::{TimeZone, Utc};

    fn repo(name: &str, kind: OwnerKind, day: u32) -> RepositorySummary {
        let owner = match kind {
            OwnerKind::Organization => "acme",
            OwnerKind::User => "octo",
        };
        RepositorySummary {
            name: name.to_string(),
            full_name: format!("{owner}/{name}"),
            owner: owner.to_string(),
            owner_kind: kind,
            owner_avatar_url: None,
            description: Some(format!("{name} description")),
            is_fork: false,
            is_private: false,
            updated_at: Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap(),
            html_url: format!("https://github.com/{owner}/{name}"),
            default_branch: "main".to_string(),
        }
    }

    fn names(selected: &[RepositorySummary]) -> Vec<&str> {
        selected.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn organizations_first_then_users_by_recency() {
        let repos = vec![
            repo("u2", OwnerKind::User, 5),
            repo("d3", OwnerKind::Organization, 1),
            repo("u1", OwnerKind::User, 9),
            repo("d1", OwnerKind::Organization, 20),
            repo("u3", OwnerKind::User, 2),
            repo("d2", OwnerKind::Organization, 10),
        ];

        let selected = SelectionPolicy::new(4, 2).select(&repos);

        assert_eq!(names(&selected), vec!["d1", "d2", "u1", "u2"]);
    }

    #[test]
    fn drops_forks_and_undescribed_repositories() {
        let mut fork = repo("fork", OwnerKind::User, 28);
        fork.is_fork = true;
        let mut blank = repo("blank", OwnerKind::User, 27);
        blank.description = Some("  ".to_string());
        let mut missing = repo("missing", OwnerKind::Organization, 26);
        missing.description = None;
        let repos = vec![fork, blank, missing, repo("kept", OwnerKind::User, 1)];

        let selected = SelectionPolicy::default().select(&repos);

        assert_eq!(names(&selected), vec!["kept"]);
    }

    #[test]
    fn organization_deficit_is_filled_by_users() {
        let repos = vec![
            repo("d1", OwnerKind::Organization, 3),
            repo("u1", OwnerKind::User, 9),
            repo("u2", OwnerKind::User, 8),
            repo("u3", OwnerKind::User, 7),
            repo("u4", OwnerKind::User, 6),
        ];

        let selected = SelectionPolicy::new(4, 2).select(&repos);

        assert_eq!(names(&selected), vec!["d1", "u1", "u2", "u3"]);
    }

    #[test]
    fn organization_cap_is_never_exceeded() {
        let repos = vec![
            repo("d1", OwnerKind::Organization, 9),
            repo("d2", OwnerKind::Organization, 8),
            repo("d3", OwnerKind::Organization, 7),
            repo("u1", OwnerKind::User, 1),
        ];

        let selected = SelectionPolicy::new(4, 2).select(&repos);

        assert_eq!(names(&selected), vec!["d1", "d2", "u1"]);
        assert!(selected.iter().filter(|r| r.is_organization_owned()).count() <= 2);
    }

    #[test]
    fn size_is_bounded_by_available_repositories() {
        let repos = vec![repo("u1", OwnerKind::User, 1)];
        assert_eq!(SelectionPolicy::new(4, 2).select(&repos).len(), 1);
        assert!(SelectionPolicy::new(4, 2).select(&[]).is_empty());
    }

    #[test]
    fn cap_larger_than_limit_is_clamped() {
        let repos = vec![
            repo("d1", OwnerKind::Organization, 9),
            repo("d2", OwnerKind::Organization, 8),
            repo("d3", OwnerKind::Organization, 7),
        ];

        let selected = SelectionPolicy::new(2, 5).select(&repos);

        assert_eq!(names(&selected), vec!["d1", "d2"]);
    }

    #[test]
    fn equal_timestamps_keep_api_order() {
        let repos = vec![
            repo("first", OwnerKind::User, 4),
            repo("second", OwnerKind::User, 4),
            repo("third", OwnerKind::User, 4),
        ];

        let selected = SelectionPolicy::new(4, 2).select(&repos);

        assert_eq!(names(&selected), vec!["first", "second", "third"]);
    }

    #[test]
    fn excluded_names_are_skipped() {
        let repos = vec![
            repo("octo.github.io", OwnerKind::User, 9),
            repo("engine", OwnerKind::Organization, 8),
            repo("tool", OwnerKind::User, 7),
        ];

        let selected = SelectionPolicy::new(4, 2)
            .with_excluded(["Octo.GitHub.io", "acme/engine"])
            .select(&repos);

        assert_eq!(names(&selected), vec!["tool"]);
    }

    #[test]
    fn organization_entries_precede_user_entries() {
        let repos = vec![
            repo("u1", OwnerKind::User, 28),
            repo("d1", OwnerKind::Organization, 1),
        ];

        let selected = SelectionPolicy::default().select(&repos);

        assert_eq!(names(&selected), vec!["d1", "u1"]);
    }
}
