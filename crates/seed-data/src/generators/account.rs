//! Admin and user account generation.
//!
//! Both tables share a shape: an id, an owning department, an email and a
//! throwaway password.

use rand::Rng;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Which account table a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    Admin,
    User,
}

impl AccountRole {
    /// Local part prefix used in generated emails.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Admin => "admin",
            AccountRole::User => "user",
        }
    }
}

/// Generated admin or user ready for database insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAccount {
    pub role: AccountRole,
    pub id: i32,
    pub dept_id: i32,
    pub email: String,
    pub password: String,
}

/// Generates accounts attached to already-seeded departments.
pub struct AccountGenerator {
    role: AccountRole,
    department_count: i32,
    password_length: usize,
}

impl AccountGenerator {
    /// `department_count` must be positive whenever accounts are generated.
    pub fn new(role: AccountRole, department_count: i32) -> Self {
        Self {
            role,
            department_count,
            password_length: 8,
        }
    }

    pub fn generate_batch(&self, count: i32, rng: &mut impl Rng) -> Vec<GeneratedAccount> {
        (1..=count)
            .map(|id| GeneratedAccount {
                role: self.role,
                id,
                dept_id: rng.gen_range(1..=self.department_count),
                email: format!("{}{id}@example.com", self.role.as_str()),
                password: random_letters(self.password_length, rng),
            })
            .collect()
    }
}

/// Random mixed-case ASCII letters.
pub fn random_letters(length: usize, rng: &mut impl Rng) -> String {
    (0..length)
        .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
        .collect()
}
