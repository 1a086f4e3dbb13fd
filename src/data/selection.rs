// ---------------------------------------------------------------------------
// Pick – one (entity, variable) row in the selector panel
// ---------------------------------------------------------------------------

/// One user-configured (entity, variable) selection. Either half may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pick {
    pub entity: Option<String>,
    pub variable: Option<String>,
}

impl Pick {
    pub fn new(entity: &str, variable: &str) -> Self {
        Pick {
            entity: Some(entity.to_string()),
            variable: Some(variable.to_string()),
        }
    }

    /// Both halves chosen.
    pub fn is_complete(&self) -> bool {
        self.entity.is_some() && self.variable.is_some()
    }

    /// Display label `"{entity} - {variable}"`, only for complete picks.
    pub fn label(&self) -> Option<String> {
        match (&self.entity, &self.variable) {
            (Some(e), Some(v)) => Some(series_label(e, v)),
            _ => None,
        }
    }
}

pub fn series_label(entity: &str, variable: &str) -> String {
    format!("{entity} - {variable}")
}

// ---------------------------------------------------------------------------
// Selection – ordered, never-empty list of picks
// ---------------------------------------------------------------------------

/// A user interaction on the selector rows, applied after the frame is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction {
    Add,
    Remove(usize),
    SetEntity(usize, Option<String>),
    SetVariable(usize, Option<String>),
}

/// Ordered list of picks. Always holds at least one pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    picks: Vec<Pick>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            picks: vec![Pick::default()],
        }
    }
}

impl Selection {
    /// Append an empty pick and return its index.
    pub fn add(&mut self) -> usize {
        self.picks.push(Pick::default());
        self.picks.len() - 1
    }

    /// Remove the pick at `index`. The last remaining pick is never removed,
    /// and out-of-range indices are ignored. Returns whether a pick was removed.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.picks.len() <= 1 || index >= self.picks.len() {
            return false;
        }
        self.picks.remove(index);
        true
    }

    /// Change the entity of a pick. A different entity clears the variable,
    /// since variables are only meaningful for the entity they were chosen from.
    pub fn set_entity(&mut self, index: usize, entity: Option<String>) {
        if let Some(pick) = self.picks.get_mut(index) {
            if pick.entity != entity {
                pick.variable = None;
                pick.entity = entity;
            }
        }
    }

    pub fn set_variable(&mut self, index: usize, variable: Option<String>) {
        if let Some(pick) = self.picks.get_mut(index) {
            pick.variable = variable;
        }
    }

    pub fn apply(&mut self, action: SelectionAction) {
        log::debug!("selection action: {action:?}");
        match action {
            SelectionAction::Add => {
                self.add();
            }
            SelectionAction::Remove(index) => {
                self.remove(index);
            }
            SelectionAction::SetEntity(index, entity) => self.set_entity(index, entity),
            SelectionAction::SetVariable(index, variable) => self.set_variable(index, variable),
        }
    }

    pub fn picks(&self) -> &[Pick] {
        &self.picks
    }

    /// Picks with both entity and variable set, in selection order.
    pub fn complete(&self) -> impl Iterator<Item = &Pick> {
        self.picks.iter().filter(|p| p.is_complete())
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_picks() -> Selection {
        let mut sel = Selection::default();
        sel.set_entity(0, Some("SP".into()));
        sel.set_variable(0, Some("PIB".into()));
        let i = sel.add();
        sel.set_entity(i, Some("RJ".into()));
        sel
    }

    #[test]
    fn starts_with_one_empty_pick() {
        let sel = Selection::default();
        assert_eq!(sel.picks(), [Pick::default()]);
        assert_eq!(sel.complete().count(), 0);
    }

    #[test]
    fn add_then_remove_last_restores_list() {
        let before = two_picks();
        let mut sel = before.clone();
        let i = sel.add();
        assert!(sel.remove(i));
        assert_eq!(sel, before);
    }

    #[test]
    fn removing_the_only_pick_is_a_noop() {
        let mut sel = Selection::default();
        sel.set_entity(0, Some("SP".into()));
        let before = sel.clone();
        assert!(!sel.remove(0));
        assert_eq!(sel, before);
    }

    #[test]
    fn out_of_range_remove_is_ignored() {
        let mut sel = two_picks();
        assert!(!sel.remove(7));
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut sel = two_picks();
        sel.add();
        sel.remove(0);
        assert_eq!(sel.picks()[0].entity.as_deref(), Some("RJ"));
        assert_eq!(sel.picks()[1], Pick::default());
    }

    #[test]
    fn changing_entity_clears_variable() {
        let mut sel = two_picks();
        sel.set_entity(0, Some("SP".into()));
        assert_eq!(sel.picks()[0], Pick::new("SP", "PIB"));

        sel.set_entity(0, Some("MG".into()));
        let pick = &sel.picks()[0];
        assert_eq!(pick.entity.as_deref(), Some("MG"));
        assert_eq!(pick.variable, None);
    }

    #[test]
    fn apply_routes_actions() {
        let mut sel = Selection::default();
        sel.apply(SelectionAction::Add);
        sel.apply(SelectionAction::SetEntity(1, Some("SP".into())));
        sel.apply(SelectionAction::SetVariable(1, Some("PIB".into())));
        sel.apply(SelectionAction::Remove(0));

        assert_eq!(sel.picks(), [Pick::new("SP", "PIB")]);
        assert_eq!(
            sel.complete().filter_map(Pick::label).collect::<Vec<_>>(),
            ["SP - PIB"]
        );
    }
}
