//! Scripted periods played by the runner.
//!
//! The `script` section of `wakkerdam-config.yaml` lists one entry per
//! night/day pair. Each entry holds the night choices, an optional lynch,
//! and an optional hunter shot if the lynched player turns out to be a
//! hunter.

use serde::Deserialize;
use tracing::{info, warn};
use wakkerdam_core::{DeathOutcome, GameSession, SessionError};
use wakkerdam_types::Action;

use crate::error::EngineError;
use crate::summary;

/// One night choice.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptedAction {
    /// Who acts.
    pub performer: String,
    /// What they do.
    pub action: Action,
    /// Who they do it to. Absent withdraws the choice.
    #[serde(default)]
    pub target: Option<String>,
}

/// One night followed by one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PeriodScript {
    /// Night choices, applied in order.
    #[serde(default)]
    pub night: Vec<ScriptedAction>,
    /// Who the village lynches during the day.
    #[serde(default)]
    pub lynch: Option<String>,
    /// Who a lynched hunter takes along.
    #[serde(default)]
    pub hunter_shot: Option<String>,
}

/// How a script run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptEnd {
    /// Every period was played and nobody has won yet.
    Exhausted,
    /// A team won during the given period (1-based).
    Won(usize),
}

/// Parse the `script` section out of a full config document.
///
/// A missing section is an empty script.
pub fn parse(contents: &str) -> Result<Vec<PeriodScript>, EngineError> {
    let raw: serde_yml::Value =
        serde_yml::from_str(contents).map_err(|e| EngineError::Script {
            message: format!("failed to parse config YAML: {e}"),
        })?;
    let Some(script) = raw.get("script") else {
        return Ok(Vec::new());
    };
    serde_yml::from_value(script.clone()).map_err(|e| EngineError::Script {
        message: format!("failed to parse script section: {e}"),
    })
}

/// Play `script` on `session` until it runs out or a team wins.
pub fn play(
    session: &mut GameSession,
    script: &[PeriodScript],
) -> Result<ScriptEnd, EngineError> {
    for (index, period) in script.iter().enumerate() {
        let number = index.saturating_add(1);
        if !session.is_day() {
            plan_night(session, &period.night)?;
            session.execute_night()?;
            summary::log_report(session);
            if session.winner().is_some() {
                return Ok(ScriptEnd::Won(number));
            }
        }

        if let Some(name) = period.lynch.as_deref() {
            if session.is_alive(name) {
                let outcome = session.lynch(name)?;
                resolve_hunter(session, outcome, period.hunter_shot.as_deref())?;
                summary::log_report(session);
                if session.winner().is_some() {
                    return Ok(ScriptEnd::Won(number));
                }
            } else {
                warn!(player = name, "scripted lynch target is already dead");
            }
        }

        summary::log_percentages(session);
        session.go_to_night()?;
        info!(period = number, "period finished");
    }
    Ok(ScriptEnd::Exhausted)
}

/// Enter the night choices. Choices for roles the performer can no longer
/// hold are skipped.
fn plan_night(session: &mut GameSession, night: &[ScriptedAction]) -> Result<(), EngineError> {
    for choice in night {
        let result = match &choice.target {
            Some(target) => session.set_night_action(&choice.performer, choice.action, target),
            None => session.clear_night_action(&choice.performer, choice.action),
        };
        match result {
            Ok(()) => {}
            Err(SessionError::ActionNotAllowed { player, action }) => {
                warn!(player = %player, action = ?action, "scripted night action skipped");
            }
            Err(other) => return Err(other.into()),
        }
    }
    Ok(())
}

/// Let a lynched hunter take someone along.
fn resolve_hunter(
    session: &mut GameSession,
    outcome: DeathOutcome,
    shot: Option<&str>,
) -> Result<(), EngineError> {
    if !outcome.retaliates || session.winner().is_some() {
        return Ok(());
    }
    let Some(target) = shot else {
        warn!("a hunter was lynched but the script names no one to shoot");
        return Ok(());
    };
    if !session.is_alive(target) {
        warn!(target_player = target, "scripted hunter target is already dead");
        return Ok(());
    }
    session.hunter_shot(target)?;
    Ok(())
}
