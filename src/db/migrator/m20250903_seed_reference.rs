use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const COUNTRIES: &[&str] = &[
    "United States",
    "United Kingdom",
    "Japan",
    "South Korea",
    "China",
    "France",
    "Germany",
    "Spain",
    "India",
    "Brazil",
];

const GENRES: &[&str] = &[
    "Drama",
    "Comedy",
    "Action",
    "Romance",
    "Thriller",
    "Sci-Fi",
    "Fantasy",
    "Horror",
    "Documentary",
    "Animation",
];

/// Hash the bootstrap admin password using Argon2id
fn hash_default_password() -> String {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let password = b"password";
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password, &salt)
        .expect("Failed to hash default password")
        .to_string()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for cname in COUNTRIES {
            let insert = sea_orm_migration::sea_query::Query::insert()
                .into_table(Country)
                .columns([crate::entities::country::Column::Cname])
                .values_panic([(*cname).into()])
                .to_owned();
            manager.exec_stmt(insert).await?;
        }

        for tname in GENRES {
            let insert = sea_orm_migration::sea_query::Query::insert()
                .into_table(GenreType)
                .columns([crate::entities::genre_type::Column::Tname])
                .values_panic([(*tname).into()])
                .to_owned();
            manager.exec_stmt(insert).await?;
        }

        // Seed bootstrap admin with hashed password
        let password_hash = hash_default_password();

        let insert = sea_orm_migration::sea_query::Query::insert()
            .into_table(Admin)
            .columns([
                crate::entities::admin::Column::Username,
                crate::entities::admin::Column::PasswordHash,
                crate::entities::admin::Column::Fname,
                crate::entities::admin::Column::Lname,
            ])
            .values_panic([
                "admin".into(),
                password_hash.into(),
                "System".into(),
                "Administrator".into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = sea_orm_migration::sea_query::Query::delete()
            .from_table(Admin)
            .and_where(
                Expr::col(crate::entities::admin::Column::Username).eq("admin"),
            )
            .to_owned();
        manager.exec_stmt(delete).await?;

        let delete = sea_orm_migration::sea_query::Query::delete()
            .from_table(GenreType)
            .to_owned();
        manager.exec_stmt(delete).await?;

        let delete = sea_orm_migration::sea_query::Query::delete()
            .from_table(Country)
            .to_owned();
        manager.exec_stmt(delete).await?;

        Ok(())
    }
}
