//! The enumerated discrete action space.
//!
//! An action is one joint green configuration across all junctions.  The
//! table is the cartesian product of each junction's green-phase codes,
//! taken in junction declaration order, materialized once at startup.
//! Action `i` decodes to a per-junction phase-code vector; looking that
//! vector up again yields `i` (the mapping is a bijection).
//!
//! Phase codes follow the simulator's signal-program convention: green
//! phases are the even integers `0, 2, …, 2*(phase_count-1)`, and the odd
//! code `g + 1` is the yellow interval that clears green phase `g`.  The
//! enumeration therefore ranges over even codes only.

use crate::{ActionId, TlcError, TlcResult, Topology};

/// Yellow code for a given green phase code.
#[inline]
pub fn yellow_code(green: u32) -> u32 {
    green + 1
}

/// The fully materialized action table.
///
/// Row `i` is the per-junction green phase codes of `ActionId(i)`, aligned
/// with `Topology::junctions` declaration order.  Built once; read-only.
#[derive(Clone, Debug)]
pub struct ActionTable {
    codes: Vec<Vec<u32>>,
}

impl ActionTable {
    /// Enumerate the full action space for `topology`.
    ///
    /// The table size is the product of per-junction phase counts; the
    /// topology validation has already rejected zero-phase junctions.
    pub fn build(topology: &Topology) -> TlcResult<ActionTable> {
        let mut codes: Vec<Vec<u32>> = vec![vec![]];

        // Iterative cartesian product: extend every partial row by each of
        // the next junction's green codes.
        for junction in &topology.junctions {
            let greens: Vec<u32> = (0..junction.phase_count).map(|p| 2 * p).collect();
            let mut next = Vec::with_capacity(codes.len() * greens.len());
            for row in &codes {
                for &g in &greens {
                    let mut extended = row.clone();
                    extended.push(g);
                    next.push(extended);
                }
            }
            codes = next;
        }

        if codes.len() > u16::MAX as usize {
            return Err(TlcError::Config(format!(
                "action space of {} actions exceeds the supported maximum",
                codes.len()
            )));
        }

        Ok(ActionTable { codes })
    }

    /// Number of actions in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Decode an action into its per-junction green phase codes (aligned
    /// with the topology's junction order).
    pub fn decode(&self, action: ActionId) -> TlcResult<&[u32]> {
        self.codes
            .get(action.index())
            .map(Vec::as_slice)
            .ok_or(TlcError::ActionOutOfRange(action, self.codes.len()))
    }

    /// Find the action whose green codes equal `codes`, if any.  Inverse of
    /// [`decode`](Self::decode).
    pub fn encode(&self, codes: &[u32]) -> Option<ActionId> {
        self.codes
            .iter()
            .position(|row| row.as_slice() == codes)
            .map(|i| ActionId(i as u16))
    }

    /// Indices of junctions whose green code differs between two actions.
    /// These are the junctions that need a yellow interval when switching
    /// from `old` to `new`.
    pub fn changed_junctions(&self, old: ActionId, new: ActionId) -> TlcResult<Vec<usize>> {
        let old_codes = self.decode(old)?;
        let new_codes = self.decode(new)?;
        Ok(old_codes
            .iter()
            .zip(new_codes)
            .enumerate()
            .filter(|(_, (o, n))| o != n)
            .map(|(i, _)| i)
            .collect())
    }

    /// Iterate over all `ActionId`s in table order.
    pub fn action_ids(&self) -> impl Iterator<Item = ActionId> + '_ {
        (0..self.codes.len()).map(|i| ActionId(i as u16))
    }
}
