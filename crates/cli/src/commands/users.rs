//! User commands.

use tracing::info;

use tiny_erp_core::{UserId, UserRole};
use tiny_erp_store::{Erp, FileStorage, UserInput};

use super::CommandError;

/// Add a user.
///
/// # Errors
///
/// Returns an error if the email is malformed or the write fails.
pub fn add(
    erp: &mut Erp<FileStorage>,
    name: String,
    email: String,
    role: UserRole,
) -> Result<(), Box<dyn std::error::Error>> {
    // Basic email validation
    if !email.contains('@') {
        return Err(format!("Invalid email: {email}").into());
    }

    let user = erp.users_mut().add(UserInput { name, email, role })?;
    info!(
        "User created! ID: {}, Email: {}, Role: {}",
        user.id, user.email, user.role
    );
    Ok(())
}

/// List every user.
pub fn list(erp: &Erp<FileStorage>) {
    let users = erp.users().list();
    info!("Users ({})", users.len());
    for user in users {
        info!("  {} | {} | {} | {}", user.id, user.name, user.email, user.role);
    }
}

/// Replace a user, keeping the current value of fields not given.
///
/// # Errors
///
/// Returns an error if the user does not exist or the write fails.
pub fn update(
    erp: &mut Erp<FileStorage>,
    id: UserId,
    name: Option<String>,
    email: Option<String>,
    role: Option<UserRole>,
) -> Result<(), Box<dyn std::error::Error>> {
    let current = erp
        .users()
        .get(id)
        .ok_or_else(|| CommandError::not_found("User", id))?;

    let input = UserInput {
        name: name.unwrap_or_else(|| current.name.clone()),
        email: email.unwrap_or_else(|| current.email.clone()),
        role: role.unwrap_or(current.role),
    };

    let user = erp
        .users_mut()
        .update(id, input)?
        .ok_or_else(|| CommandError::not_found("User", id))?;

    info!("User updated! {} ({})", user.name, user.role);
    Ok(())
}

/// Delete a user.
///
/// # Errors
///
/// Returns an error if the user does not exist or the write fails.
pub fn delete(erp: &mut Erp<FileStorage>, id: UserId) -> Result<(), Box<dyn std::error::Error>> {
    let user = erp
        .users_mut()
        .delete(id)?
        .ok_or_else(|| CommandError::not_found("User", id))?;

    info!("User deleted: {}", user.email);
    Ok(())
}
