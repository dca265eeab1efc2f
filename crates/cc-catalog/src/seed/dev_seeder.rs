//! Development Data Seeder
//!
//! Seeds development data on application startup: a partner with marketing
//! site credentials, an organization, and the editor group that holds the
//! people permissions.

use mongodb::Database;
use tracing::info;

use crate::{Group, Organization, Partner, permissions};
use crate::{GroupRepository, OrganizationRepository, PartnerRepository};

/// Development data seeder
pub struct DevDataSeeder {
    db: Database,
}

impl DevDataSeeder {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Seed all development data
    pub async fn seed(&self) -> Result<(), Box<dyn std::error::Error>> {
        info!("=== DEV DATA SEEDER ===");
        info!("Seeding development data...");

        let partner = self.seed_partner().await?;
        self.seed_organization(&partner).await?;
        self.seed_groups().await?;

        info!("Development data seeded successfully!");
        info!("=======================");

        Ok(())
    }

    async fn seed_partner(&self) -> Result<Partner, Box<dyn std::error::Error>> {
        let repo = PartnerRepository::new(&self.db);

        if let Some(existing) = repo.find_by_short_code("dev").await? {
            return Ok(existing);
        }

        let partner = Partner::new("Dev Partner", "dev")
            .with_marketing_site("https://marketing.dev.local", "dev-api", "dev-password");
        repo.insert(&partner).await?;
        info!("Created partner: {} ({})", partner.name, partner.id);

        Ok(partner)
    }

    async fn seed_organization(&self, partner: &Partner) -> Result<(), Box<dyn std::error::Error>> {
        let repo = OrganizationRepository::new(&self.db);

        if repo.find_by_key("DevX").await?.is_some() {
            return Ok(());
        }

        let organization = Organization::new(&partner.id, "DevX", "Dev University");
        repo.insert(&organization).await?;
        info!("Created organization: {} ({})", organization.name, organization.id);

        Ok(())
    }

    async fn seed_groups(&self) -> Result<(), Box<dyn std::error::Error>> {
        let repo = GroupRepository::new(&self.db);

        if repo.find_by_code("internal-editors").await?.is_some() {
            return Ok(());
        }

        let editors = Group::new("internal-editors", "Internal Editors")
            .with_permissions(permissions::people::ALL.iter().copied());
        repo.insert(&editors).await?;
        info!("Created group: internal-editors");

        let admins = Group::new("catalog-admins", "Catalog Admins")
            .with_permissions([permissions::ADMIN_ALL]);
        repo.insert(&admins).await?;
        info!("Created group: catalog-admins");

        Ok(())
    }
}
