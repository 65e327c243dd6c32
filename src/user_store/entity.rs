use crate::model::User;
use store_framework::{ReadOnly, RemoteResource};

impl RemoteResource for User {
    type Id = u64;
    type Create = ReadOnly;
    type Update = ReadOnly;

    const COLLECTION_PATH: &'static str = "/api/users";
    const SINGULAR_KEY: &'static str = "user";
    const PLURAL_KEY: &'static str = "users";

    fn id(&self) -> &u64 {
        &self.id
    }

    fn verify(&self) -> Result<(), String> {
        if self.username.trim().is_empty() {
            return Err("username is empty".to_string());
        }
        if self.email.trim().is_empty() {
            return Err("email is empty".to_string());
        }
        Ok(())
    }
}
