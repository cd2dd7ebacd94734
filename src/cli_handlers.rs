use crate::error::Result;
use crate::manager::{DATA_FILE_NAME, TodoManager};
use crate::settings::Settings;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Handle the add command
pub fn handle_add(name: &str, list: Option<usize>) -> Result<()> {
    let settings = Settings::load_current_dir()?;
    let mut manager = TodoManager::load_current_dir()?;
    let list_index = list.unwrap_or(settings.current_list_index);

    let task_index = manager.add_task(list_index, name)?;
    manager.save_current_dir()?;
    debug!("added task: {name}");

    println!("Added task #{task_index} to list #{list_index}: {name}");

    Ok(())
}

/// Handle the list command
pub fn handle_list(all: bool, list: Option<usize>) -> Result<()> {
    let settings = Settings::load_current_dir()?;
    let manager = TodoManager::load_current_dir()?;
    let list_index = list.unwrap_or(settings.current_list_index);

    let todo_list = manager.get_list(list_index)?;
    println!("List #{list_index}: {}", display_name(&todo_list.name));

    if todo_list.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    let show_completed = all || settings.show_completed_tasks;
    let mut hidden = 0;
    for (index, task) in todo_list.tasks.iter().enumerate() {
        if task.completed && !show_completed {
            hidden += 1;
            continue;
        }
        println!("  [#{index:>3}] {} {}", task.icon(), task.name);
    }

    if hidden > 0 {
        println!("  ({hidden} completed hidden; use --all to show)");
    }

    Ok(())
}

/// Handle the toggle command
pub fn handle_toggle(index: usize, list: Option<usize>) -> Result<()> {
    let settings = Settings::load_current_dir()?;
    let mut manager = TodoManager::load_current_dir()?;
    let list_index = list.unwrap_or(settings.current_list_index);

    let completed = manager.toggle_task(list_index, index)?;
    manager.save_current_dir()?;

    let task = manager.get_task(list_index, index)?;
    if completed {
        println!("Completed task #{index}: {}", task.name);
    } else {
        println!("Reopened task #{index}: {}", task.name);
    }

    Ok(())
}

/// Handle the rename command
pub fn handle_rename(index: usize, name: &str, list: Option<usize>) -> Result<()> {
    let settings = Settings::load_current_dir()?;
    let mut manager = TodoManager::load_current_dir()?;
    let list_index = list.unwrap_or(settings.current_list_index);

    manager.rename_task(list_index, index, name)?;
    manager.save_current_dir()?;

    println!("Renamed task #{index} to: {name}");

    Ok(())
}

/// Handle the remove command
pub fn handle_remove(index: usize, list: Option<usize>) -> Result<()> {
    let settings = Settings::load_current_dir()?;
    let mut manager = TodoManager::load_current_dir()?;
    let list_index = list.unwrap_or(settings.current_list_index);

    let task = manager.remove_task(list_index, index)?;
    manager.save_current_dir()?;
    debug!("deleted task with index {index}");

    println!("Removed task #{index}: {}", task.name);

    Ok(())
}

/// Handle the lists command
pub fn handle_lists() -> Result<()> {
    let settings = Settings::load_current_dir()?;
    let manager = TodoManager::load_current_dir()?;

    if manager.count() == 0 {
        println!("No lists found.");
        return Ok(());
    }

    for (index, list) in manager.lists().iter().enumerate() {
        let marker = if index == settings.current_list_index {
            "*"
        } else {
            " "
        };
        let done = list.tasks.iter().filter(|t| t.completed).count();
        println!(
            " {marker} [#{index}] {} ({done}/{} done)",
            display_name(&list.name),
            list.len()
        );
    }

    Ok(())
}

/// Handle the add-list command
pub fn handle_add_list(name: Option<&str>) -> Result<()> {
    let mut manager = TodoManager::load_current_dir()?;

    let index = manager.add_list(name);
    manager.save_current_dir()?;

    println!("Created list #{index}: {}", display_name(name.unwrap_or("")));

    Ok(())
}

/// Handle the rename-list command
pub fn handle_rename_list(index: usize, name: &str) -> Result<()> {
    let mut manager = TodoManager::load_current_dir()?;

    manager.rename_list(index, name)?;
    manager.save_current_dir()?;

    println!("Renamed list #{index} to: {name}");

    Ok(())
}

/// Handle the remove-list command
pub fn handle_remove_list(index: usize) -> Result<()> {
    let mut settings = Settings::load_current_dir()?;
    let mut manager = TodoManager::load_current_dir()?;

    let removed = manager.remove_list(index)?;
    manager.save_current_dir()?;

    // The selected list may have just disappeared or shifted.
    settings.clamp_list_index(manager.count());
    settings.save_current_dir()?;

    println!("Removed list #{index}: {}", display_name(&removed.name));

    Ok(())
}

/// Handle the use command
pub fn handle_use(index: usize) -> Result<()> {
    let mut settings = Settings::load_current_dir()?;
    let manager = TodoManager::load_current_dir()?;

    let list = manager.get_list(index)?;
    settings.current_list_index = index;
    settings.save_current_dir()?;

    println!("Now using list #{index}: {}", display_name(&list.name));

    Ok(())
}

/// Handle the show-completed command
pub fn handle_show_completed(value: bool) -> Result<()> {
    let mut settings = Settings::load_current_dir()?;
    settings.show_completed_tasks = value;
    settings.save_current_dir()?;

    if value {
        println!("Completed tasks are shown in list output.");
    } else {
        println!("Completed tasks are hidden from list output.");
    }

    Ok(())
}

/// Handle the logging command
pub fn handle_logging(value: bool) -> Result<()> {
    let mut settings = Settings::load_current_dir()?;
    settings.enable_logging = value;
    settings.save_current_dir()?;

    if value {
        println!("Diagnostic logging enabled.");
    } else {
        println!("Diagnostic logging disabled.");
    }

    Ok(())
}

/// Handle the reset command
pub fn handle_reset() -> Result<()> {
    if Path::new(DATA_FILE_NAME).exists() {
        fs::remove_file(DATA_FILE_NAME)?;
        info!("deleted data file");
        println!("Deleted data file.");
    } else {
        println!("No data file to delete.");
    }

    Ok(())
}

// Helper function
fn display_name(name: &str) -> &str {
    if name.is_empty() { "(unnamed)" } else { name }
}
