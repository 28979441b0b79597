use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

pub const CATEGORY_COLUMNS: &str = "id, name, slug, created_at";

/// Database model for a catalog category
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn is_vip(&self, vip_slug: &str) -> bool {
        self.slug == vip_slug
    }

    /// Storefront path of the category page
    pub fn public_path(&self, vip_slug: &str) -> String {
        if self.is_vip(vip_slug) {
            "/".to_string()
        } else {
            format!("/{}", self.slug)
        }
    }
}

/// VIP zone first, the rest by name
pub fn sort_for_sidebar(categories: &mut [Category], vip_slug: &str) {
    categories.sort_by(|a, b| {
        b.is_vip(vip_slug)
            .cmp(&a.is_vip(vip_slug))
            .then_with(|| a.name.cmp(&b.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, slug: &str) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slug.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_sidebar_puts_vip_first() {
        let mut categories = vec![
            category("Transportas", "transportas"),
            category("VIP zona", "vip-zona"),
            category("Informacija", "informacija"),
        ];
        sort_for_sidebar(&mut categories, "vip-zona");
        let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["vip-zona", "informacija", "transportas"]);
    }

    #[test]
    fn test_public_path() {
        assert_eq!(category("VIP", "vip-zona").public_path("vip-zona"), "/");
        assert_eq!(
            category("Pramogos", "pramogos").public_path("vip-zona"),
            "/pramogos"
        );
    }
}
