use crate::contract::model::{Chore, User};
use crate::infra::storage::entity::{chore, user};

/// Convert a database entity to a contract model
pub fn user_to_contract(entity: user::Model) -> User {
    User {
        id: entity.id,
        name: entity.name,
        color: entity.color,
    }
}

pub fn chore_to_contract(entity: chore::Model) -> Chore {
    Chore {
        id: entity.id,
        description: entity.description,
        date: entity.date,
        time: entity.time,
        user_id: entity.user_id,
    }
}
