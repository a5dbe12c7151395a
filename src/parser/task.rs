// ABOUTME: Task descriptors within a job and the ordered task list
// ABOUTME: Maps each pipeline step to its command namespace, action and options

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::str::FromStr;

use super::job::scalar_text;

/// Pipeline commands the dispatcher knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Get,
    Download,
    Unpack,
    Load,
    Filter,
    Apply,
    Calculate,
    Clone,
    Generate,
    Upload,
    Replace,
    PullRequest,
}

impl Command {
    pub const ALL: [Command; 12] = [
        Command::Get,
        Command::Download,
        Command::Unpack,
        Command::Load,
        Command::Filter,
        Command::Apply,
        Command::Calculate,
        Command::Clone,
        Command::Generate,
        Command::Upload,
        Command::Replace,
        Command::PullRequest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Get => "get",
            Command::Download => "download",
            Command::Unpack => "unpack",
            Command::Load => "load",
            Command::Filter => "filter",
            Command::Apply => "apply",
            Command::Calculate => "calculate",
            Command::Clone => "clone",
            Command::Generate => "generate",
            Command::Upload => "upload",
            Command::Replace => "replace",
            Command::PullRequest => "pullrequest",
        }
    }

    /// Title-case namespace the dispatcher resolves actions in
    pub fn namespace(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn supported() -> Vec<String> {
        Self::ALL.iter().map(|c| c.as_str().to_string()).collect()
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|command| command.as_str() == wanted)
            .ok_or_else(|| format!("unknown command '{}'", s))
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One pipeline step: a command and the task value attached to it.
///
/// In templates a step is written as a single-key mapping,
/// `clone: [{name: git repo}, {branch: main}]`, or as `clone: latest git branch`.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskNode {
    command: String,
    task: Value,
    extra_keys: usize,
}

impl TaskNode {
    pub fn new(command: &str, task: Value) -> Self {
        Self {
            command: command.trim().to_string(),
            task,
            extra_keys: 0,
        }
    }

    /// Build a node from a template entry; `None` if it is not a task descriptor
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Mapping(entry) => {
                let (key, task) = entry.iter().next()?;
                let command = scalar_text(key)?;
                let mut node = Self::new(&command, task.clone());
                node.extra_keys = entry.len() - 1;
                Some(node)
            }
            Value::String(entry) => {
                let (command, task) = entry.split_once(':')?;
                Some(Self::new(command, Value::String(task.trim().to_string())))
            }
            _ => None,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn task(&self) -> &Value {
        &self.task
    }

    pub fn known_command(&self) -> Option<Command> {
        self.command.parse().ok()
    }

    pub fn has_command(&self, command: &str) -> bool {
        self.command == command
    }

    /// Keys after the first in the source mapping, which are ignored
    pub fn extra_keys(&self) -> usize {
        self.extra_keys
    }

    /// Human name of the step
    pub fn name(&self) -> String {
        match &self.task {
            Value::Sequence(options) => match options.first() {
                Some(Value::Mapping(first)) => first
                    .get("name")
                    .and_then(scalar_text)
                    .unwrap_or_default(),
                Some(other) => scalar_text(other).unwrap_or_default(),
                None => String::new(),
            },
            other => scalar_text(other).unwrap_or_default(),
        }
    }

    /// Method-like identifier derived from the name, e.g. `git repo` -> `git_repo`
    pub fn action(&self) -> String {
        let lowered = self.name().to_lowercase();
        let mut action = String::with_capacity(lowered.len());
        let mut pending_separator = false;
        for c in lowered.chars() {
            if c.is_whitespace() || c == '-' {
                pending_separator = !action.is_empty();
            } else {
                if pending_separator {
                    action.push('_');
                    pending_separator = false;
                }
                action.push(c);
            }
        }
        action
    }

    /// Options following the name entry, merged into one mapping
    pub fn options(&self) -> Mapping {
        let mut merged = Mapping::new();
        if let Value::Sequence(options) = &self.task {
            for option in options.iter().skip(1) {
                if let Value::Mapping(option) = option {
                    for (key, value) in option {
                        merged.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        merged
    }

    pub fn option(&self, key: &str) -> Option<Value> {
        self.options().get(key).cloned()
    }
}

/// Ordered sequence of task nodes, in template order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList {
    nodes: Vec<TaskNode>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries that are not task descriptors are dropped
    pub fn from_values(values: &[Value]) -> Self {
        Self {
            nodes: values.iter().filter_map(TaskNode::from_value).collect(),
        }
    }

    pub fn push(&mut self, node: TaskNode) {
        self.nodes.push(node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TaskNode> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaskNode> {
        self.nodes.iter()
    }

    /// Positions of the nodes running `command`
    pub fn search_tasks_for_cmd(&self, command: &str) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.has_command(command))
            .map(|(index, _)| index)
            .collect()
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a TaskNode;
    type IntoIter = std::slice::Iter<'a, TaskNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!("CLONE".parse::<Command>().unwrap(), Command::Clone);
        assert_eq!(
            "pullrequest".parse::<Command>().unwrap(),
            Command::PullRequest
        );
        assert!("delete".parse::<Command>().is_err());
        assert_eq!(Command::PullRequest.namespace(), "Pullrequest");
        assert_eq!(Command::Get.namespace(), "Get");
    }

    #[test]
    fn test_node_from_option_list() {
        let value = yaml(
            "clone:\n- name: git repo\n- type: default\n- branch: main\n- recursive: false\n",
        );
        let node = TaskNode::from_value(&value).unwrap();

        assert_eq!(node.command(), "clone");
        assert_eq!(node.known_command(), Some(Command::Clone));
        assert_eq!(node.name(), "git repo");
        assert_eq!(node.action(), "git_repo");

        let options = node.options();
        assert_eq!(options.len(), 3);
        assert_eq!(node.option("branch"), Some(Value::String("main".to_string())));
        assert_eq!(node.option("recursive"), Some(Value::Bool(false)));
        assert_eq!(node.option("name"), None);
    }

    #[test]
    fn test_node_from_plain_task() {
        let node = TaskNode::from_value(&yaml("get: latest build info")).unwrap();
        assert_eq!(node.name(), "latest build info");
        assert_eq!(node.action(), "latest_build_info");
        assert!(node.options().is_empty());

        let node = TaskNode::from_value(&Value::String("download:SRPM".to_string())).unwrap();
        assert_eq!(node.command(), "download");
        assert_eq!(node.action(), "srpm");
    }

    #[test]
    fn test_node_rejects_non_descriptors() {
        assert!(TaskNode::from_value(&yaml("42")).is_none());
        assert!(TaskNode::from_value(&yaml("no colon here")).is_none());
        assert!(TaskNode::from_value(&yaml("{}")).is_none());
    }

    #[test]
    fn test_action_collapses_separators() {
        let node = TaskNode::new("download", Value::String(" Platform  POT-file ".to_string()));
        assert_eq!(node.action(), "platform_pot_file");
    }

    #[test]
    fn test_search_tasks_for_cmd() {
        let values = vec![
            yaml("unpack: SRPM"),
            yaml("load: Spec file"),
            yaml("unpack: tarball"),
            yaml("7"),
        ];
        let list = TaskList::from_values(&values);

        assert_eq!(list.len(), 3);
        assert_eq!(list.search_tasks_for_cmd("unpack"), vec![0, 2]);
        assert!(list.search_tasks_for_cmd("upload").is_empty());
    }
}
