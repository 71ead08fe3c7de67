//! Applying a requested action when the engine may not allow it.

use log::{info, warn};

use super::{
    entities::{Action, SeatIndex},
    models::{Applied, Resolution},
};
use crate::engine::{BettingEngine, EngineError, EngineResult};

/// Apply `requested` for the seat on act, stepping down to something legal
/// when needed:
///
/// - `AllIn` raises to the seat's effective stack, or checks/calls if the
///   seat can't raise (folds if it can't even call)
/// - `Raise` makes the minimum raise, or folds
/// - `Check` and `Call` check/call, or fold
/// - `Fold` folds, unless the engine refuses because checking is free, in
///   which case the seat checks
///
/// Every fold above goes through the same refusal rule as a requested fold,
/// so a `Raise` the engine won't take checks instead of folding when there
/// is nothing to call.
///
/// Engine errors other than a refused fold are returned unchanged.
pub fn apply_with_fallback<E>(engine: &mut E, seat: SeatIndex, requested: Action) -> EngineResult<Resolution>
where
    E: BettingEngine + ?Sized,
{
    let applied = match requested {
        Action::AllIn => {
            let amount = engine.effective_stack(seat);
            if engine.can_raise_to(amount) {
                engine.raise_to(amount)?;
                Applied::RaiseTo(amount)
            } else if engine.can_check_or_call() {
                info!("Seat {seat} can't shove {amount}, calling instead");
                Applied::CheckOrCall(engine.check_or_call()?)
            } else {
                fold_or_check(engine, seat)?
            }
        }
        Action::Raise => match engine.min_raise_to() {
            Some(amount) if engine.can_raise_to(amount) => {
                engine.raise_to(amount)?;
                Applied::RaiseTo(amount)
            }
            _ => {
                info!("Seat {seat} can't raise, folding instead");
                fold_or_check(engine, seat)?
            }
        },
        Action::Check | Action::Call => {
            if engine.can_check_or_call() {
                Applied::CheckOrCall(engine.check_or_call()?)
            } else {
                info!("Seat {seat} can't {}, folding instead", requested.label());
                fold_or_check(engine, seat)?
            }
        }
        Action::Fold => fold_or_check(engine, seat)?,
    };
    Ok(Resolution { requested, applied })
}

fn fold_or_check<E>(engine: &mut E, seat: SeatIndex) -> EngineResult<Applied>
where
    E: BettingEngine + ?Sized,
{
    match engine.fold() {
        Ok(()) => Ok(Applied::Fold),
        Err(EngineError::IllegalAction { reason, .. }) if engine.can_check_or_call() => {
            warn!("Seat {seat} can't fold ({reason}), checking instead");
            Ok(Applied::CheckOrCall(engine.check_or_call()?))
        }
        Err(err) => Err(err),
    }
}
