use crate::error::TodoError;
use crate::manager::TodoManager;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt, handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters, model::*, schemars, tool, tool_handler, tool_router,
    transport::stdio,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Todo manager MCP server
#[derive(Clone)]
pub struct TodoMcp {
    manager: Arc<Mutex<TodoManager>>,
    tool_router: ToolRouter<Self>,
}

// Input types for tools
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AddTaskInput {
    pub name: String,
    #[serde(default)]
    pub list_index: usize,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TaskRefInput {
    #[serde(default)]
    pub list_index: usize,
    pub task_index: usize,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct RenameTaskInput {
    #[serde(default)]
    pub list_index: usize,
    pub task_index: usize,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ListTasksInput {
    #[serde(default)]
    pub list_index: usize,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateListInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ListRefInput {
    pub list_index: usize,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct RenameListInput {
    pub list_index: usize,
    pub name: String,
}

// Response type
#[derive(Debug, Serialize)]
pub struct McpResponse<T: Serialize> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> McpResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "ok",
            data: Some(data),
            error_code: None,
            message: None,
        }
    }

    pub fn error(error_code: &str, message: &str) -> Self {
        Self {
            status: "error",
            data: None,
            error_code: Some(error_code.to_string()),
            message: Some(message.to_string()),
        }
    }
}

fn to_json<T: Serialize>(response: McpResponse<T>) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string(&response)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn error_to_response(e: TodoError) -> McpResponse<serde_json::Value> {
    let error_code = format!("{e:?}");
    let message = e.to_string();
    McpResponse::error(&error_code, &message)
}

/// Apply a mutating operation and persist the manager state when it
/// succeeds.
fn apply<T>(
    manager: &mut TodoManager,
    op: impl FnOnce(&mut TodoManager) -> Result<T, TodoError>,
) -> Result<T, TodoError> {
    let value = op(manager)?;
    manager.save_current_dir()?;
    Ok(value)
}

#[tool_router]
impl TodoMcp {
    pub fn new() -> Result<Self, TodoError> {
        let manager = TodoManager::load_current_dir()?;
        Ok(Self {
            manager: Arc::new(Mutex::new(manager)),
            tool_router: Self::tool_router(),
        })
    }

    #[tool(
        description = "Show all todo lists with their index, name, and task counts. Lists are addressed by index in every other tool."
    )]
    async fn list_lists(&self) -> Result<CallToolResult, McpError> {
        let manager = self.manager.lock().await;

        let lists: Vec<_> = manager
            .lists()
            .iter()
            .enumerate()
            .map(|(index, list)| {
                serde_json::json!({
                    "index": index,
                    "name": list.name,
                    "total": list.len(),
                    "completed": list.tasks.iter().filter(|t| t.completed).count(),
                })
            })
            .collect();

        to_json(McpResponse::success(serde_json::json!({ "lists": lists })))
    }

    #[tool(
        description = "Show the tasks of one list, each with its index, name, and completion flag. list_index defaults to 0."
    )]
    async fn list_tasks(
        &self,
        params: Parameters<ListTasksInput>,
    ) -> Result<CallToolResult, McpError> {
        let manager = self.manager.lock().await;
        let p = params.0;

        match manager.get_list(p.list_index) {
            Ok(list) => {
                let tasks: Vec<_> = list
                    .tasks
                    .iter()
                    .enumerate()
                    .map(|(index, task)| {
                        serde_json::json!({
                            "index": index,
                            "name": task.name,
                            "completed": task.completed,
                        })
                    })
                    .collect();
                to_json(McpResponse::success(serde_json::json!({
                    "list_index": p.list_index,
                    "name": list.name,
                    "tasks": tasks,
                })))
            }
            Err(e) => to_json(error_to_response(e)),
        }
    }

    #[tool(
        description = "Add a new task to a list. The task starts not completed. list_index defaults to 0."
    )]
    async fn add_task(&self, params: Parameters<AddTaskInput>) -> Result<CallToolResult, McpError> {
        let mut manager = self.manager.lock().await;
        let p = params.0;

        match apply(&mut manager, |m| m.add_task(p.list_index, &p.name)) {
            Ok(task_index) => to_json(McpResponse::success(serde_json::json!({
                "list_index": p.list_index,
                "task_index": task_index,
                "name": p.name,
            }))),
            Err(e) => to_json(error_to_response(e)),
        }
    }

    #[tool(description = "Flip a task's completion flag. Returns the new state.")]
    async fn toggle_task(
        &self,
        params: Parameters<TaskRefInput>,
    ) -> Result<CallToolResult, McpError> {
        let mut manager = self.manager.lock().await;
        let p = params.0;

        match apply(&mut manager, |m| m.toggle_task(p.list_index, p.task_index)) {
            Ok(completed) => to_json(McpResponse::success(serde_json::json!({
                "list_index": p.list_index,
                "task_index": p.task_index,
                "completed": completed,
            }))),
            Err(e) => to_json(error_to_response(e)),
        }
    }

    #[tool(description = "Rename a task.")]
    async fn rename_task(
        &self,
        params: Parameters<RenameTaskInput>,
    ) -> Result<CallToolResult, McpError> {
        let mut manager = self.manager.lock().await;
        let p = params.0;

        match apply(&mut manager, |m| {
            m.rename_task(p.list_index, p.task_index, &p.name)
        }) {
            Ok(()) => to_json(McpResponse::success(serde_json::json!({
                "message": format!("Renamed task #{} to: {}", p.task_index, p.name)
            }))),
            Err(e) => to_json(error_to_response(e)),
        }
    }

    #[tool(description = "Remove a task from a list. Later tasks shift down by one index.")]
    async fn remove_task(
        &self,
        params: Parameters<TaskRefInput>,
    ) -> Result<CallToolResult, McpError> {
        let mut manager = self.manager.lock().await;
        let p = params.0;

        match apply(&mut manager, |m| m.remove_task(p.list_index, p.task_index)) {
            Ok(task) => to_json(McpResponse::success(serde_json::json!({
                "removed": task,
            }))),
            Err(e) => to_json(error_to_response(e)),
        }
    }

    #[tool(
        description = "Create a new todo list, optionally named. Names are not unique. Returns the new list's index."
    )]
    async fn create_list(
        &self,
        params: Parameters<CreateListInput>,
    ) -> Result<CallToolResult, McpError> {
        let mut manager = self.manager.lock().await;
        let p = params.0;

        match apply(&mut manager, |m| Ok(m.add_list(p.name.as_deref()))) {
            Ok(index) => to_json(McpResponse::success(serde_json::json!({
                "index": index,
                "name": p.name.unwrap_or_default(),
            }))),
            Err(e) => to_json(error_to_response(e)),
        }
    }

    #[tool(description = "Rename a todo list.")]
    async fn rename_list(
        &self,
        params: Parameters<RenameListInput>,
    ) -> Result<CallToolResult, McpError> {
        let mut manager = self.manager.lock().await;
        let p = params.0;

        match apply(&mut manager, |m| m.rename_list(p.list_index, &p.name)) {
            Ok(()) => to_json(McpResponse::success(serde_json::json!({
                "message": format!("Renamed list #{} to: {}", p.list_index, p.name)
            }))),
            Err(e) => to_json(error_to_response(e)),
        }
    }

    #[tool(
        description = "Remove a todo list and all of its tasks. Later lists shift down by one index."
    )]
    async fn remove_list(
        &self,
        params: Parameters<ListRefInput>,
    ) -> Result<CallToolResult, McpError> {
        let mut manager = self.manager.lock().await;
        let p = params.0;

        match apply(&mut manager, |m| m.remove_list(p.list_index)) {
            Ok(list) => to_json(McpResponse::success(serde_json::json!({
                "removed": list.name,
                "tasks_removed": list.len(),
            }))),
            Err(e) => to_json(error_to_response(e)),
        }
    }
}

#[tool_handler]
impl ServerHandler for TodoMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "EasyToDo - a todo list manager. State is a set of named lists, each holding ordered tasks \
                 addressed by index. Use list_lists to see the lists and list_tasks to read one. Use add_task, \
                 toggle_task, rename_task, and remove_task to work with tasks, and create_list, rename_list, \
                 and remove_list to manage the lists themselves. Every change is persisted immediately.".to_string()
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_mcp_server() -> anyhow::Result<()> {
    let mcp = TodoMcp::new().map_err(|e| {
        eprintln!("Failed to initialize MCP server: {e}");
        e
    })?;

    let service = mcp.serve(stdio()).await.inspect_err(|e| {
        eprintln!("Error starting MCP server: {e}");
    })?;

    service.waiting().await?;
    Ok(())
}
