//! Log lines for period reports, percentages and the final result.

use rust_decimal::Decimal;
use tracing::info;
use wakkerdam_core::{GameSession, RoleDistribution};
use wakkerdam_types::{PlayerId, wolf_title};

/// Render a share as a percentage with two decimals.
fn percent(share: Decimal) -> String {
    let value = share
        .checked_mul(Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO)
        .round_dp(2);
    format!("{value}%")
}

/// Render a role distribution, most likely role first.
fn format_distribution(distribution: &RoleDistribution) -> String {
    if distribution.is_empty() {
        return "dead".to_owned();
    }
    let mut shares: Vec<_> = distribution.iter().collect();
    shares.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    shares
        .into_iter()
        .map(|(role, share)| format!("{role} {}", percent(*share)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Log every announcement of the latest period.
pub fn log_report(session: &GameSession) {
    for line in session.report() {
        info!(day = session.day(), "{line}");
    }
}

/// Log role and death percentages for every player.
pub fn log_percentages(session: &GameSession) {
    let deaths = session.death_percentage_of_all_players();
    for ((name, distribution), (_, death)) in session
        .role_percentages_of_all_players()
        .iter()
        .zip(deaths)
    {
        info!(
            player = %name,
            death = %percent(death),
            roles = %format_distribution(distribution),
            "player odds"
        );
    }
}

/// Log the outcome and, when the game is over, one surviving world in full.
pub fn log_result(session: &GameSession) {
    info!(
        game = session.name(),
        day = session.day(),
        worlds = session.worlds().len(),
        events = session.worlds().events().len(),
        winner = ?session.winner(),
        "game finished"
    );
    if session.winner().is_none() {
        return;
    }
    let Some(world) = session.worlds().worlds().first() else {
        return;
    };
    for (position, name) in session.roster().names().iter().enumerate() {
        let Some(player) = PlayerId::from_position(position) else {
            continue;
        };
        let title = world
            .wolf_rank(player)
            .map_or_else(String::new, wolf_title);
        info!(
            world = %world.id(),
            player = %name,
            role = ?world.role_of(player),
            alive = world.is_alive(player),
            wolf_title = %title,
            "final assignment"
        );
    }
}
