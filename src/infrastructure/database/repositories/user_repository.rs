use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::warn;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, FavoriteWalletAddress, Permission, TagId,
    UpdateUserDto, User, UserRepositoryInterface, UserTag,
};
use crate::infrastructure::database::entities::{favorite_wallet_address, user, user_tag};
use crate::shared::errors::InfraError;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_favorites(&self, user_id: &str) -> DomainResult<Vec<FavoriteWalletAddress>> {
        let rows = favorite_wallet_address::Entity::find()
            .filter(favorite_wallet_address::Column::UserId.eq(user_id))
            .order_by_asc(favorite_wallet_address::Column::Position)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        rows.into_iter().map(favorite_model_to_domain).collect()
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    InfraError::Database(e).into()
}

fn parse_permissions(user_id: &str, raw: &str) -> Vec<Permission> {
    let names: Vec<String> = serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!(user_id, error = %e, "Unreadable permissions column, treating as empty");
        Vec::new()
    });

    names
        .iter()
        .filter_map(|name| {
            let parsed = Permission::parse(name);
            if parsed.is_none() {
                warn!(user_id, permission = %name, "Ignoring unknown permission");
            }
            parsed
        })
        .collect()
}

fn encode_permissions(permissions: &[Permission]) -> DomainResult<String> {
    let names: Vec<&str> = permissions.iter().map(Permission::as_str).collect();
    serde_json::to_string(&names).map_err(|e| InfraError::Serialization(e).into())
}

fn user_model_to_domain(model: user::Model) -> User {
    let permissions = parse_permissions(&model.id, &model.permissions);
    User {
        id: model.id,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        permissions,
        tags: Vec::new(),
        favorite_wallet_addresses: Vec::new(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn tag_model_to_domain(model: user_tag::Model) -> UserTag {
    UserTag {
        id: TagId::new(model.id),
        name: model.name,
        created_at: model.created_at,
    }
}

fn favorite_model_to_domain(
    model: favorite_wallet_address::Model,
) -> DomainResult<FavoriteWalletAddress> {
    let tags: Vec<TagId> =
        serde_json::from_str(&model.tags).map_err(|e| DomainError::from(InfraError::from(e)))?;
    Ok(FavoriteWalletAddress {
        wallet_address: model.wallet_address,
        tags,
    })
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();
        let mut permissions: Vec<Permission> = Vec::new();
        for p in dto.permissions {
            if !permissions.contains(&p) {
                permissions.push(p);
            }
        }

        let model = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            email: Set(dto.email),
            first_name: Set(dto.first_name),
            last_name: Set(dto.last_name),
            permissions: Set(encode_permissions(&permissions)?),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(user_model_to_domain(model))
    }

    async fn create_tag(&self, user_id: &str, name: &str) -> DomainResult<UserTag> {
        if user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Err(DomainError::user_not_found(user_id));
        }

        let model = user_tag::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            name: Set(name.to_string()),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(tag_model_to_domain(model))
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let Some(model) = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut user = user_model_to_domain(model);
        user.favorite_wallet_addresses = self.load_favorites(id).await?;
        Ok(Some(user))
    }

    async fn get_user_tags(&self, user_id: &str) -> DomainResult<Vec<UserTag>> {
        let tags = user_tag::Entity::find()
            .filter(user_tag::Column::UserId.eq(user_id))
            .order_by_asc(user_tag::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(tags.into_iter().map(tag_model_to_domain).collect())
    }

    async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let Some(model) = user::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = model.into();
        if let Some(email) = dto.email {
            active.email = Set(Some(email));
        }
        if let Some(first_name) = dto.first_name {
            active.first_name = Set(Some(first_name));
        }
        if let Some(last_name) = dto.last_name {
            active.last_name = Set(Some(last_name));
        }
        active.updated_at = Set(Utc::now());
        active.update(&txn).await.map_err(db_err)?;

        // Favorites are replaced wholesale
        if let Some(favorites) = dto.favorite_wallet_addresses {
            favorite_wallet_address::Entity::delete_many()
                .filter(favorite_wallet_address::Column::UserId.eq(id))
                .exec(&txn)
                .await
                .map_err(db_err)?;

            let mut rows = Vec::with_capacity(favorites.len());
            for (position, favorite) in favorites.into_iter().enumerate() {
                let tags = serde_json::to_string(&favorite.tags)
                    .map_err(|e| DomainError::from(InfraError::from(e)))?;
                rows.push(favorite_wallet_address::ActiveModel {
                    user_id: Set(id.to_string()),
                    position: Set(position as i32),
                    wallet_address: Set(favorite.wallet_address),
                    tags: Set(tags),
                    ..Default::default()
                });
            }

            if !rows.is_empty() {
                favorite_wallet_address::Entity::insert_many(rows)
                    .exec(&txn)
                    .await
                    .map_err(db_err)?;
            }
        }

        txn.commit().await.map_err(db_err)?;

        self.get_user_by_id(id).await
    }

    async fn add_permission(&self, id: &str, permission: Permission) -> DomainResult<Option<User>> {
        let Some(model) = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut permissions = parse_permissions(id, &model.permissions);
        if !permissions.contains(&permission) {
            permissions.push(permission);
            let mut active: user::ActiveModel = model.into();
            active.permissions = Set(encode_permissions(&permissions)?);
            active.updated_at = Set(Utc::now());
            active.update(&self.db).await.map_err(db_err)?;
        }

        self.get_user_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::infrastructure::database::migrator::Migrator;

    async fn repo() -> UserRepository {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        UserRepository::new(db)
    }

    #[tokio::test]
    async fn created_user_round_trips_with_permissions() {
        let repo = repo().await;
        let created = repo
            .create_user(CreateUserDto {
                email: Some("ada@example.com".into()),
                permissions: vec![Permission::EmailVerified, Permission::AccessStudio],
                ..Default::default()
            })
            .await
            .unwrap();

        let loaded = repo.get_user_by_id(&created.id).await.unwrap().unwrap();

        assert_eq!(loaded.email.as_deref(), Some("ada@example.com"));
        assert_eq!(
            loaded.permissions,
            vec![Permission::EmailVerified, Permission::AccessStudio]
        );
        assert!(loaded.favorite_wallet_addresses.is_empty());
    }

    #[tokio::test]
    async fn favorites_are_replaced_in_order() {
        let repo = repo().await;
        let user = repo.create_user(CreateUserDto::default()).await.unwrap();
        let tag = repo.create_tag(&user.id, "Exchange").await.unwrap();

        let first = vec![
            FavoriteWalletAddress::new("0x1", [tag.id.clone()]),
            FavoriteWalletAddress::new("0x2", Vec::<TagId>::new()),
        ];
        repo.update_user(
            &user.id,
            UpdateUserDto {
                favorite_wallet_addresses: Some(first),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let second = vec![
            FavoriteWalletAddress::new("0x9", Vec::<TagId>::new()),
            FavoriteWalletAddress::new("0x1", [tag.id.clone()]),
        ];
        let updated = repo
            .update_user(
                &user.id,
                UpdateUserDto {
                    favorite_wallet_addresses: Some(second.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.favorite_wallet_addresses, second);
    }

    #[tokio::test]
    async fn update_without_favorites_keeps_stored_list() {
        let repo = repo().await;
        let user = repo.create_user(CreateUserDto::default()).await.unwrap();
        let favorites = vec![FavoriteWalletAddress::new("0x1", Vec::<TagId>::new())];
        repo.update_user(
            &user.id,
            UpdateUserDto {
                favorite_wallet_addresses: Some(favorites.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let updated = repo
            .update_user(
                &user.id,
                UpdateUserDto {
                    first_name: Some("Ada".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.first_name.as_deref(), Some("Ada"));
        assert_eq!(updated.favorite_wallet_addresses, favorites);
    }

    #[tokio::test]
    async fn tags_are_listed_per_user() {
        let repo = repo().await;
        let user = repo.create_user(CreateUserDto::default()).await.unwrap();
        let other = repo.create_user(CreateUserDto::default()).await.unwrap();
        let tag = repo.create_tag(&user.id, "Friends").await.unwrap();

        let tags = repo.get_user_tags(&user.id).await.unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].id, tag.id);
        assert_eq!(tags[0].name, "Friends");
        assert!(repo.get_user_tags(&other.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_permission_persists_once() {
        let repo = repo().await;
        let user = repo.create_user(CreateUserDto::default()).await.unwrap();

        repo.add_permission(&user.id, Permission::Onboarded)
            .await
            .unwrap();
        let user = repo
            .add_permission(&user.id, Permission::Onboarded)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(user.permissions, vec![Permission::Onboarded]);
    }

    #[tokio::test]
    async fn missing_user_yields_none() {
        let repo = repo().await;

        assert!(repo.get_user_by_id("nobody").await.unwrap().is_none());
        assert!(repo
            .update_user("nobody", UpdateUserDto::default())
            .await
            .unwrap()
            .is_none());
        assert!(matches!(
            repo.create_tag("nobody", "x").await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
