//! Support conditions (nodal fixity)

use serde::{Deserialize, Serialize};

use crate::error::{IsoVisError, IsoVisResult};

/// Restraint flags at a node, ordered [DX, DY, DZ, RX, RY, RZ]
///
/// Models with fewer DOFs per node only use the leading entries; a 2D
/// frame with ndf = 3 stores [UX, UY, RZ] in the first three slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Support {
    pub restraints: [bool; 6],
}

impl Support {
    /// Create a fully fixed support (all DOFs restrained)
    pub fn fixed() -> Self {
        Self {
            restraints: [true; 6],
        }
    }

    /// Build from a fixity list of 0 (free) / 1 (fixed) flags.
    /// An empty list means all DOFs free.
    pub fn from_fixity(fixity: &[u8]) -> IsoVisResult<Self> {
        if fixity.len() > 6 {
            return Err(IsoVisError::InvalidInput(format!(
                "fixity has {} entries, at most 6 allowed",
                fixity.len()
            )));
        }
        let mut restraints = [false; 6];
        for (slot, &flag) in restraints.iter_mut().zip(fixity) {
            *slot = match flag {
                0 => false,
                1 => true,
                other => {
                    return Err(IsoVisError::InvalidInput(format!(
                        "fixity values must be 0 (free) or 1 (fixed), got {}",
                        other
                    )))
                }
            };
        }
        Ok(Self { restraints })
    }

    /// Check if the first `ndf` DOFs are all restrained
    pub fn is_fixed(&self, ndf: usize) -> bool {
        self.restraints.iter().take(ndf.min(6)).all(|&r| r)
    }

    /// Check if any DOF is restrained
    pub fn is_supported(&self) -> bool {
        self.restraints.iter().any(|&r| r)
    }
}
