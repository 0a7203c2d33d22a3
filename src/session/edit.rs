use crate::core::{
    models::{
        Module,
        ModuleTag,
        Subtopic,
    },
    StudypathError,
};

/// Staging copy of the module list. Structural edits land here and only
/// reach the committed plan through `Session::save_edits`; cancelling drops
/// the draft without touching anything.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub modules: Vec<Module>,
}

impl EditDraft {
    pub fn from_committed(modules: &[Module]) -> Self {
        Self { modules: modules.to_vec() }
    }

    fn module_mut(&mut self, title: &str) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| m.topic == title)
    }

    pub fn rename_module(&mut self, title: &str, new_title: impl Into<String>) -> bool {
        match self.module_mut(title) {
            Some(module) => {
                module.topic = new_title.into();
                true
            }
            None => false,
        }
    }

    pub fn rename_subtopic(
        &mut self,
        module_title: &str,
        index: usize,
        new_name: impl Into<String>,
    ) -> bool {
        let Some(subtopic) =
            self.module_mut(module_title).and_then(|m| m.subtopics.get_mut(index))
        else {
            return false;
        };
        subtopic.name = new_name.into();
        true
    }

    /// Appends a placeholder subtopic at the end of the module.
    pub fn add_subtopic(&mut self, module_title: &str) -> bool {
        match self.module_mut(module_title) {
            Some(module) => {
                module.subtopics.push(Subtopic::placeholder());
                true
            }
            None => false,
        }
    }

    pub fn delete_subtopic(&mut self, module_title: &str, index: usize) -> bool {
        match self.module_mut(module_title) {
            Some(module) if index < module.subtopics.len() => {
                module.subtopics.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Swaps with the previous sibling; no-op at the top.
    pub fn move_subtopic_up(&mut self, module_title: &str, index: usize) -> bool {
        match self.module_mut(module_title) {
            Some(module) if index > 0 && index < module.subtopics.len() => {
                module.subtopics.swap(index - 1, index);
                true
            }
            _ => false,
        }
    }

    /// Swaps with the next sibling; no-op at the bottom.
    pub fn move_subtopic_down(&mut self, module_title: &str, index: usize) -> bool {
        match self.module_mut(module_title) {
            Some(module) if index + 1 < module.subtopics.len() => {
                module.subtopics.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    pub fn delete_module(&mut self, title: &str) -> bool {
        let before = self.modules.len();
        self.modules.retain(|m| m.topic != title);
        self.modules.len() < before
    }

    /// Appends an empty module tagged needed.
    pub fn add_module(&mut self) {
        self.modules.push(Module::new("New module", ModuleTag::Needed));
    }

    /// Commit-time checks. Failing here keeps the draft alive so no work is
    /// lost; the committed plan is untouched either way.
    pub fn validate(&self) -> Result<(), StudypathError> {
        if self.modules.is_empty() {
            return Err(StudypathError::InvalidDraft("the plan needs at least one module".into()));
        }
        for module in &self.modules {
            if module.topic.trim().is_empty() {
                return Err(StudypathError::InvalidDraft("module titles cannot be empty".into()));
            }
            if module.subtopics.iter().any(|s| s.name.trim().is_empty()) {
                return Err(StudypathError::InvalidDraft(
                    "subtopic names cannot be empty".into(),
                ));
            }
        }
        let mut titles: Vec<&str> = self.modules.iter().map(|m| m.topic.as_str()).collect();
        titles.sort_unstable();
        titles.dedup();
        if titles.len() < self.modules.len() {
            return Err(StudypathError::InvalidDraft("module titles must be unique".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EditDraft {
        let mut a = Module::new("A", ModuleTag::Needed);
        a.subtopics = vec![Subtopic::named("a1"), Subtopic::named("a2"), Subtopic::named("a3")];
        let b = Module::new("B", ModuleTag::NotNeeded);
        EditDraft::from_committed(&[a, b])
    }

    #[test]
    fn delete_then_add_appends_placeholder_at_end() {
        let mut d = draft();
        assert!(d.delete_subtopic("A", 1));
        assert!(d.add_subtopic("A"));

        let names: Vec<&str> =
            d.modules[0].subtopics.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a1", "a3", "New subtopic"]);
        assert_eq!(d.modules[0].subtopics.len(), 3);
    }

    #[test]
    fn reorder_is_a_noop_at_boundaries() {
        let mut d = draft();
        assert!(!d.move_subtopic_up("A", 0));
        assert!(!d.move_subtopic_down("A", 2));

        assert!(d.move_subtopic_down("A", 0));
        let names: Vec<&str> =
            d.modules[0].subtopics.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a2", "a1", "a3"]);
    }

    #[test]
    fn rename_and_delete_module() {
        let mut d = draft();
        assert!(d.rename_module("B", "Basics"));
        assert!(!d.rename_module("B", "gone"));
        assert!(d.delete_module("Basics"));
        assert_eq!(d.modules.len(), 1);
    }

    #[test]
    fn add_module_appends_empty_needed_module() {
        let mut d = draft();
        d.add_module();
        let last = d.modules.last().unwrap();
        assert_eq!(last.topic, "New module");
        assert_eq!(last.tag, ModuleTag::Needed);
        assert!(last.subtopics.is_empty());
    }

    #[test]
    fn validation_rejects_duplicates_and_blanks() {
        let mut d = draft();
        assert!(d.validate().is_ok());

        d.add_module();
        d.add_module();
        assert!(d.validate().is_err());

        let mut d = draft();
        d.rename_module("A", "  ");
        assert!(d.validate().is_err());

        let mut d = draft();
        d.modules.clear();
        assert!(d.validate().is_err());
    }
}
