//! [`ActorEntity`] implementation for [`Customer`].
//!
//! Customers have no actions and no dependencies. Emails are unique (compared
//! case-insensitively) and neither name nor email may be blank.

use super::error::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use async_trait::async_trait;
use store_actor::ActorEntity;

fn require(field: &str, value: String) -> Result<String, CustomerError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(CustomerError::Validation(format!("{field} must not be empty")));
    }
    Ok(value)
}

#[async_trait]
impl ActorEntity for Customer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = CustomerUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = CustomerError;

    fn id(&self) -> &CustomerId {
        &self.id
    }

    fn from_create_params(id: CustomerId, params: CustomerCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            name: require("name", params.name)?,
            email: require("email", params.email)?,
        })
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.email.eq_ignore_ascii_case(&other.email)
    }

    async fn on_update(&mut self, update: CustomerUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = require("name", name)?;
        }
        if let Some(email) = update.email {
            self.email = require("email", email)?;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, email: &str) -> Result<Customer, CustomerError> {
        Customer::from_create_params(
            CustomerId(1),
            CustomerCreate {
                name: name.into(),
                email: email.into(),
            },
        )
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert!(matches!(create(" ", "a@example.com"), Err(CustomerError::Validation(_))));
        assert!(matches!(create("Ann", ""), Err(CustomerError::Validation(_))));
        assert_eq!(create(" Ann ", "a@example.com").unwrap().name, "Ann");
    }

    #[test]
    fn emails_conflict_regardless_of_case() {
        let a = create("Ann", "ann@example.com").unwrap();
        let b = create("Other Ann", "ANN@example.com").unwrap();
        let c = create("Bo", "bo@example.com").unwrap();
        assert!(a.conflicts_with(&b));
        assert!(!a.conflicts_with(&c));
    }
}
