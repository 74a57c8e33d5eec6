//! Unit store: the unit list and the active-unit selection.

use std::sync::RwLock;

use fuelops_core::{BusinessUnit, BusinessUnitId};

/// Injectable holder of `unidades` and `unidad_activa`.
///
/// `None` as active unit means "all units". The selection has a single public
/// writer, [`crate::ScopeContext::select_unit`]; this type only exposes the raw
/// setter inside the crate.
#[derive(Debug, Default)]
pub struct UnitStore {
    units: RwLock<Vec<BusinessUnit>>,
    active: RwLock<Option<BusinessUnit>>,
}

impl UnitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_units(units: Vec<BusinessUnit>) -> Self {
        Self {
            units: RwLock::new(units),
            active: RwLock::new(None),
        }
    }

    /// Replace the unit list (e.g. after a refetch).
    ///
    /// The active selection is re-pointed at the refreshed record, or cleared
    /// when its unit disappeared.
    pub fn set_units(&self, units: Vec<BusinessUnit>) {
        if let Ok(mut active) = self.active.write() {
            if let Some(current) = active.as_ref() {
                let refreshed = units.iter().find(|u| u.id == current.id).cloned();
                if refreshed.is_none() {
                    tracing::info!(unit_id = %current.id, "active unit no longer listed; clearing selection");
                }
                *active = refreshed;
            }
        }
        if let Ok(mut slot) = self.units.write() {
            *slot = units;
        }
    }

    pub fn units(&self) -> Vec<BusinessUnit> {
        match self.units.read() {
            Ok(units) => units.clone(),
            Err(_) => Vec::new(),
        }
    }

    pub fn find(&self, id: BusinessUnitId) -> Option<BusinessUnit> {
        let units = self.units.read().ok()?;
        units.iter().find(|u| u.id == id).cloned()
    }

    pub fn active(&self) -> Option<BusinessUnit> {
        self.active.read().ok()?.clone()
    }

    pub(crate) fn set_active(&self, unit: Option<BusinessUnit>) {
        if let Ok(mut active) = self.active.write() {
            *active = unit;
        }
    }
}
