//! The two fixed teams and their derived rosters.

use rampart_protocol::{PlayerId, Rgb, TeamId, TeamInfo};

use crate::players::PlayerRegistry;

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// One of the two teams. Lives for the whole session.
#[derive(Debug, Clone)]
pub struct Team {
    /// Fixed team id.
    pub id: TeamId,
    /// Display name.
    pub name: String,
    /// Display color.
    pub color: Rgb,
    /// Current score. Derived from capture events, never set directly by
    /// packets.
    pub score: u32,
    /// Score needed to win.
    pub score_cap: u32,
    members: Vec<PlayerId>,
}

impl Team {
    fn new(id: TeamId, info: TeamInfo) -> Self {
        Self {
            id,
            name: info.name,
            color: info.color,
            score: 0,
            score_cap: 0,
            members: Vec::new(),
        }
    }

    /// Roster in scoreboard order: kill count descending, ties in pid
    /// order. Rebuilt every frame by [`TeamRegistry::refresh`].
    pub fn members(&self) -> &[PlayerId] {
        &self.members
    }
}

// ---------------------------------------------------------------------------
// TeamRegistry
// ---------------------------------------------------------------------------

/// Both teams.
#[derive(Debug)]
pub struct TeamRegistry {
    team1: Team,
    team2: Team,
}

impl TeamRegistry {
    /// Create the two teams from their session-start info.
    pub fn new(team1: TeamInfo, team2: TeamInfo) -> Self {
        Self {
            team1: Team::new(TeamId::Team1, team1),
            team2: Team::new(TeamId::Team2, team2),
        }
    }

    /// Look up a team.
    pub fn get(&self, id: TeamId) -> &Team {
        match id {
            TeamId::Team1 => &self.team1,
            TeamId::Team2 => &self.team2,
        }
    }

    /// Mutable lookup.
    pub fn get_mut(&mut self, id: TeamId) -> &mut Team {
        match id {
            TeamId::Team1 => &mut self.team1,
            TeamId::Team2 => &mut self.team2,
        }
    }

    /// The team opposing `id`. Intel messages name the enemy team.
    pub fn other(&self, id: TeamId) -> &Team {
        self.get(id.other())
    }

    /// Rebuild both rosters from the registry: players whose team matches,
    /// sorted by kill count descending. The sort is stable, so equal kill
    /// counts keep the registry's pid order — required for a deterministic
    /// scoreboard.
    pub fn refresh(&mut self, players: &PlayerRegistry) {
        for team in [&mut self.team1, &mut self.team2] {
            let mut ranked: Vec<(PlayerId, u32)> = players
                .iter()
                .filter(|p| p.team == team.id)
                .map(|p| (p.pid, p.kills))
                .collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1));
            team.members.clear();
            team.members.extend(ranked.into_iter().map(|(pid, _)| pid));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
