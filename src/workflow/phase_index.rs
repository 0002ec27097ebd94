//! Grouping of teams by phase.

use super::Team;

/// One phase and the teams that belong to it, in dataset order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseGroup<'a> {
    pub phase: &'a str,
    pub teams: Vec<&'a Team>,
}

impl PhaseGroup<'_> {
    pub fn task_count(&self) -> usize {
        self.teams.iter().map(|t| t.tasks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Ordered mapping from phase name to the ordered teams in that phase.
///
/// Declared phases come first, in declaration order, and are present even
/// when no team uses them. Phases used by teams but never declared follow in
/// the order they are first encountered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhaseIndex<'a> {
    groups: Vec<PhaseGroup<'a>>,
}

impl<'a> PhaseIndex<'a> {
    pub fn groups(&self) -> &[PhaseGroup<'a>] {
        &self.groups
    }

    pub fn get(&self, phase: &str) -> Option<&PhaseGroup<'a>> {
        self.groups.iter().find(|g| g.phase == phase)
    }

    pub fn team_count(&self) -> usize {
        self.groups.iter().map(|g| g.teams.len()).sum()
    }

    pub fn total_tasks(&self) -> usize {
        self.groups.iter().map(PhaseGroup::task_count).sum()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group `teams` by phase. Pure and deterministic.
pub fn group_by_phase<'a>(phases: &'a [String], teams: &'a [Team]) -> PhaseIndex<'a> {
    let mut groups: Vec<PhaseGroup<'a>> = phases
        .iter()
        .map(|p| PhaseGroup {
            phase: p.as_str(),
            teams: Vec::new(),
        })
        .collect();

    for team in teams {
        match groups.iter_mut().find(|g| g.phase == team.phase) {
            Some(group) => group.teams.push(team),
            None => groups.push(PhaseGroup {
                phase: team.phase.as_str(),
                teams: vec![team],
            }),
        }
    }

    PhaseIndex { groups }
}
