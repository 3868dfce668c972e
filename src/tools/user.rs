//! In-memory user directory

use super::{PrimitiveType, ToolDefinition, ToolProvider, ToolSignature};
use crate::types::{Result, ToolError};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;
use uuid::Uuid;

const ID_LENGTH: usize = 3;
const MAX_ID_ATTEMPTS: usize = 32;

#[derive(Debug, Clone, PartialEq)]
struct User {
    id: String,
    name: String,
    email: String,
    position: String,
}

impl User {
    fn new(id: &str, name: &str, email: &str, position: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            position: position.to_string(),
        }
    }
}

type Directory = Arc<Mutex<BTreeMap<String, User>>>;

pub struct UserTools {
    directory: Directory,
}

impl UserTools {
    /// Directory seeded with users 001 to 003
    pub fn new() -> Self {
        let seed = [
            User::new("001", "Zhang San", "zhangsan@example.com", "Engineer"),
            User::new("002", "Li Si", "lisi@example.com", "Designer"),
            User::new("003", "Wang Wu", "wangwu@example.com", "Product Manager"),
        ];

        Self {
            directory: Arc::new(Mutex::new(
                seed.into_iter().map(|u| (u.id.clone(), u)).collect(),
            )),
        }
    }
}

impl Default for UserTools {
    fn default() -> Self {
        Self::new()
    }
}

/// A panicking tool leaves the directory consistent, so a poisoned lock is reused
fn lock(directory: &Directory) -> MutexGuard<'_, BTreeMap<String, User>> {
    directory.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ToolProvider for UserTools {
    fn namespace(&self) -> &str {
        "User"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        let by_id = Arc::clone(&self.directory);
        let list = Arc::clone(&self.directory);
        let create = Arc::clone(&self.directory);
        let search = Arc::clone(&self.directory);

        vec![
            ToolSignature::new("getUserById", "Look up a user by id")
                .param("userId", PrimitiveType::String, "User id")
                .handler(move |args| {
                    let user_id = args.text(0)?;
                    info!("getUserById: {}", user_id);
                    let users = lock(&by_id);
                    Ok(match users.get(user_id) {
                        Some(user) => format!(
                            "User - ID: {}, Name: {}, Email: {}, Position: {}",
                            user.id, user.name, user.email, user.position
                        ),
                        None => format!(
                            "No user with id {}. Existing ids: {}",
                            user_id,
                            users.keys().cloned().collect::<Vec<_>>().join(", ")
                        ),
                    })
                }),
            ToolSignature::new("listAllUsers", "List every user").handler(move |_| {
                info!("listAllUsers");
                let users = lock(&list);
                let mut output = String::from("Users:\n");
                for user in users.values() {
                    output.push_str(&format!(
                        "- ID: {}, Name: {}, Position: {}\n",
                        user.id, user.name, user.position
                    ));
                }
                Ok(output)
            }),
            ToolSignature::new("createUser", "Create a new user")
                .param("name", PrimitiveType::String, "User name")
                .param("email", PrimitiveType::String, "User email")
                .param("position", PrimitiveType::String, "User position")
                .handler(move |args| {
                    let (name, email, position) = (args.text(0)?, args.text(1)?, args.text(2)?);
                    info!("createUser: {}, {}, {}", name, email, position);
                    let mut users = lock(&create);
                    let id = fresh_id(&users)?;
                    users.insert(id.clone(), User::new(&id, name, email, position));
                    Ok(format!(
                        "User created - ID: {}, Name: {}, Email: {}, Position: {}",
                        id, name, email, position
                    ))
                }),
            ToolSignature::new("searchUserByName", "Find users whose name contains the given text")
                .param("name", PrimitiveType::String, "Name or part of a name")
                .handler(move |args| {
                    let name = args.text(0)?;
                    info!("searchUserByName: {}", name);
                    let users = lock(&search);
                    let matches: Vec<&User> = users.values().filter(|u| u.name.contains(name)).collect();
                    if matches.is_empty() {
                        return Ok(format!("No user name contains \"{}\"", name));
                    }
                    let mut output = String::from("Search results:\n");
                    for user in matches {
                        output.push_str(&format!(
                            "- ID: {}, Name: {}, Position: {}\n",
                            user.id, user.name, user.position
                        ));
                    }
                    Ok(output)
                }),
        ]
    }
}

/// Short id taken from a random UUID, retried on collision
fn fresh_id(users: &BTreeMap<String, User>) -> Result<String> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let id: String = Uuid::new_v4().simple().to_string()[..ID_LENGTH].to_string();
        if !users.contains_key(&id) {
            return Ok(id);
        }
    }
    Err(ToolError::Invocation("could not allocate a user id".to_string()))
}
