use crate::error::{Result, TodoError};
use crate::models::{Task, TodoList};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// File the whole manager state is persisted to, relative to the working
/// directory.
pub const DATA_FILE_NAME: &str = "EasyToDoData.json";

/// Root of the persisted state tree: an ordered, index-addressed collection
/// of todo lists with whole-state JSON persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoManager {
    lists: Vec<TodoList>,
}

impl Default for TodoManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoManager {
    /// A fresh manager always contains exactly one default list, so index 0
    /// is valid immediately after construction.
    pub fn new() -> Self {
        TodoManager {
            lists: vec![TodoList::named("Default")],
        }
    }

    // ==================== List Operations ====================

    /// Append a new list, optionally named. Names are not unique and this
    /// always succeeds. Returns the new list's index.
    pub fn add_list(&mut self, name: Option<&str>) -> usize {
        self.lists.push(match name {
            Some(name) => TodoList::named(name),
            None => TodoList::new(),
        });
        self.lists.len() - 1
    }

    /// Remove and return the list at `index`. The collection may become
    /// empty; the one-default-list invariant only holds at construction.
    pub fn remove_list(&mut self, index: usize) -> Result<TodoList> {
        self.check_list(index)?;
        Ok(self.lists.remove(index))
    }

    pub fn rename_list(&mut self, index: usize, name: &str) -> Result<()> {
        self.list_mut(index)?.name = name.to_string();
        Ok(())
    }

    pub fn get_list(&self, index: usize) -> Result<&TodoList> {
        self.list(index)
    }

    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    /// Count of lists.
    pub fn count(&self) -> usize {
        self.lists.len()
    }

    /// Count of tasks in the list at `index`.
    pub fn count_by_index(&self, index: usize) -> Result<usize> {
        Ok(self.list(index)?.tasks.len())
    }

    // ==================== Task Operations ====================

    /// Append a new, not-completed task to the list at `list_index`. Returns
    /// the new task's index within that list.
    pub fn add_task(&mut self, list_index: usize, name: &str) -> Result<usize> {
        let list = self.list_mut(list_index)?;
        list.tasks.push(Task::new(name));
        Ok(list.tasks.len() - 1)
    }

    /// Remove and return the task at `task_index` of the list at
    /// `list_index`.
    pub fn remove_task(&mut self, list_index: usize, task_index: usize) -> Result<Task> {
        self.check_task(list_index, task_index)?;
        Ok(self.lists[list_index].tasks.remove(task_index))
    }

    pub fn get_task(&self, list_index: usize, task_index: usize) -> Result<&Task> {
        self.check_task(list_index, task_index)?;
        Ok(&self.lists[list_index].tasks[task_index])
    }

    pub fn get_task_mut(&mut self, list_index: usize, task_index: usize) -> Result<&mut Task> {
        self.check_task(list_index, task_index)?;
        Ok(&mut self.lists[list_index].tasks[task_index])
    }

    /// Flip a task's completion flag. Returns the new state.
    pub fn toggle_task(&mut self, list_index: usize, task_index: usize) -> Result<bool> {
        let task = self.get_task_mut(list_index, task_index)?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    pub fn rename_task(&mut self, list_index: usize, task_index: usize, name: &str) -> Result<()> {
        self.get_task_mut(list_index, task_index)?.name = name.to_string();
        Ok(())
    }

    // ==================== Persistence ====================

    /// Serialize the whole manager state to a JSON document.
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Replace the whole manager state from a JSON document. No incremental
    /// merge; the previous tree is discarded wholesale.
    pub fn deserialize(&mut self, json: &str) -> Result<()> {
        *self = serde_json::from_str(json)?;
        Ok(())
    }

    /// Overwrite the file at `path` with the serialized manager state.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.serialize()?;
        fs::write(path, &json)?;
        debug!("saved data: {json}");
        Ok(())
    }

    /// Load the manager state from `path`. A missing file is first run, not
    /// an error: a default manager is written to `path` and returned.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let json = fs::read_to_string(path)?;
            let manager = serde_json::from_str(&json)?;
            debug!("loaded data: {json}");
            Ok(manager)
        } else {
            info!("no data file at {}, generating a new one", path.display());
            let manager = Self::new();
            manager.save_to_file(path)?;
            Ok(manager)
        }
    }

    /// Load from the data file in the working directory.
    pub fn load_current_dir() -> Result<Self> {
        Self::load_from_file(DATA_FILE_NAME)
    }

    /// Save to the data file in the working directory.
    pub fn save_current_dir(&self) -> Result<()> {
        self.save_to_file(DATA_FILE_NAME)
    }

    // ==================== Helper Methods ====================

    fn list(&self, index: usize) -> Result<&TodoList> {
        let len = self.lists.len();
        self.lists
            .get(index)
            .ok_or(TodoError::ListIndexOutOfRange { index, len })
    }

    fn list_mut(&mut self, index: usize) -> Result<&mut TodoList> {
        let len = self.lists.len();
        self.lists
            .get_mut(index)
            .ok_or(TodoError::ListIndexOutOfRange { index, len })
    }

    fn check_list(&self, index: usize) -> Result<()> {
        self.list(index).map(|_| ())
    }

    fn check_task(&self, list_index: usize, task_index: usize) -> Result<()> {
        let list = self.list(list_index)?;
        if task_index < list.tasks.len() {
            Ok(())
        } else {
            Err(TodoError::TaskIndexOutOfRange {
                list: list_index,
                index: task_index,
                len: list.tasks.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn fresh_manager_has_one_empty_default_list() {
        let manager = TodoManager::new();

        assert_eq!(manager.count(), 1);
        assert_eq!(manager.count_by_index(0).unwrap(), 0);
        assert_eq!(manager.lists()[0].name, "Default");
    }

    #[test]
    fn add_task_appends_not_completed() {
        let mut manager = TodoManager::new();
        let before = manager.count_by_index(0).unwrap();

        let index = manager.add_task(0, "Buy milk").unwrap();

        assert_eq!(manager.count_by_index(0).unwrap(), before + 1);
        let task = manager.get_task(0, index).unwrap();
        assert_eq!(task.name, "Buy milk");
        assert!(!task.completed);
    }

    #[test]
    fn serialize_round_trip_reproduces_structure() {
        let mut manager = TodoManager::new();
        manager.add_task(0, "Milk").unwrap();
        manager.add_list(Some("Work"));
        manager.add_task(1, "Report").unwrap();
        manager.toggle_task(0, 0).unwrap();

        let json = manager.serialize().unwrap();
        let mut other = TodoManager::new();
        other.deserialize(&json).unwrap();

        assert_eq!(other, manager);
    }

    #[test]
    fn deserialize_replaces_wholesale() {
        let mut manager = TodoManager::new();
        manager.add_list(Some("Stale"));

        manager.deserialize(r#"{"lists":[]}"#).unwrap();

        assert_eq!(manager.count(), 0);
    }

    #[test]
    fn toggle_shows_up_in_serialized_output() {
        let mut manager = TodoManager::new();
        manager
            .deserialize(r#"{"lists":[{"name":"Default","tasks":[{"name":"Milk","completed":false}]}]}"#)
            .unwrap();

        assert!(manager.toggle_task(0, 0).unwrap());

        let json = manager.serialize().unwrap();
        assert!(json.contains(r#""tasks":[{"name":"Milk","completed":true}]"#));
    }

    #[test]
    fn toggle_twice_restores_not_completed() {
        let mut manager = TodoManager::new();
        manager.add_task(0, "Milk").unwrap();

        assert!(manager.toggle_task(0, 0).unwrap());
        assert!(!manager.toggle_task(0, 0).unwrap());
    }

    #[test]
    fn remove_task_out_of_range_leaves_list_unchanged() {
        let mut manager = TodoManager::new();
        manager.add_task(0, "Milk").unwrap();
        let before = manager.clone();

        let result = manager.remove_task(0, 5);

        assert!(matches!(
            result,
            Err(TodoError::TaskIndexOutOfRange { .. })
        ));
        assert_eq!(manager, before);
    }

    #[test]
    fn get_task_out_of_range_is_an_error() {
        let manager = TodoManager::new();

        assert!(matches!(
            manager.get_task(0, 0),
            Err(TodoError::TaskIndexOutOfRange { .. })
        ));
        assert!(matches!(
            manager.get_task(3, 0),
            Err(TodoError::ListIndexOutOfRange { .. })
        ));
    }

    #[test]
    fn remove_last_list_empties_the_collection() {
        let mut manager = TodoManager::new();

        let removed = manager.remove_list(0).unwrap();

        assert_eq!(removed.name, "Default");
        assert_eq!(manager.count(), 0);
        assert!(matches!(
            manager.remove_list(0),
            Err(TodoError::ListIndexOutOfRange { .. })
        ));
    }

    #[test]
    fn rename_task_and_list() {
        let mut manager = TodoManager::new();
        manager.add_task(0, "Milk").unwrap();

        manager.rename_task(0, 0, "Oat milk").unwrap();
        manager.rename_list(0, "Groceries").unwrap();

        assert_eq!(manager.get_task(0, 0).unwrap().name, "Oat milk");
        assert_eq!(manager.get_list(0).unwrap().name, "Groceries");
    }

    #[test]
    fn load_missing_file_synthesizes_and_persists_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("EasyToDoData.json");

        let manager = TodoManager::load_from_file(&path).unwrap();

        assert!(path.exists());
        assert_eq!(manager, TodoManager::new());

        let reloaded = TodoManager::load_from_file(&path).unwrap();
        assert_eq!(reloaded, manager);
    }

    #[test]
    fn save_then_load_round_trips_through_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");

        let mut manager = TodoManager::new();
        manager.add_task(0, "Milk").unwrap();
        manager.save_to_file(&path).unwrap();

        let loaded = TodoManager::load_from_file(&path).unwrap();
        assert_eq!(loaded, manager);
    }
}
