//! Built-in heritage catalog.
//!
//! These sites ship with the application and are loaded once, on first
//! access, for the lifetime of the process.

use sanskriti_core::catalog::{CatalogSource, CategoryInfo, HeritageSite, SiteCategory, default_categories};
use std::sync::OnceLock;

/// Compile-time description of a built-in site.
struct SiteSeed {
    id: &'static str,
    name: &'static str,
    location: &'static str,
    description: &'static str,
    image: &'static str,
    category: SiteCategory,
    state: &'static str,
    year_built: &'static str,
    significance: &'static str,
}

impl SiteSeed {
    fn to_site(&self) -> HeritageSite {
        HeritageSite {
            id: self.id.to_string(),
            name: self.name.to_string(),
            location: self.location.to_string(),
            description: self.description.to_string(),
            image: self.image.to_string(),
            category: self.category,
            state: self.state.to_string(),
            year_built: (!self.year_built.is_empty()).then(|| self.year_built.to_string()),
            significance: self.significance.to_string(),
        }
    }
}

const SITE_SEEDS: &[SiteSeed] = &[
    SiteSeed {
        id: "1",
        name: "Taj Mahal",
        location: "Agra, Uttar Pradesh",
        description: "An ivory-white marble mausoleum and UNESCO World Heritage Site, symbol of eternal love.",
        image: "https://images.unsplash.com/photo-1564507592333-c60657eea523?w=800&q=80",
        category: SiteCategory::Monument,
        state: "Uttar Pradesh",
        year_built: "1653",
        significance: "One of the New Seven Wonders of the World",
    },
    SiteSeed {
        id: "2",
        name: "Red Fort",
        location: "Delhi",
        description: "Historic fortified palace of the Mughal dynasty, a symbol of India's sovereignty.",
        image: "https://images.unsplash.com/photo-1597074866923-dc0589150215?w=800&q=80",
        category: SiteCategory::Fort,
        state: "Delhi",
        year_built: "1648",
        significance: "UNESCO World Heritage Site and site of Independence Day celebrations",
    },
    SiteSeed {
        id: "3",
        name: "Hawa Mahal",
        location: "Jaipur, Rajasthan",
        description: "Palace of Winds with intricate latticework, an architectural marvel of Rajputana.",
        image: "https://images.unsplash.com/photo-1599661046289-e31897846e41?w=800&q=80",
        category: SiteCategory::Palace,
        state: "Rajasthan",
        year_built: "1799",
        significance: "Iconic symbol of Jaipur's royal heritage",
    },
    SiteSeed {
        id: "4",
        name: "Gateway of India",
        location: "Mumbai, Maharashtra",
        description: "Iconic arch-monument built to commemorate the visit of British royalty.",
        image: "https://images.unsplash.com/photo-1570168007204-dfb528c6958f?w=800&q=80",
        category: SiteCategory::Monument,
        state: "Maharashtra",
        year_built: "1924",
        significance: "Symbol of Mumbai and major tourist attraction",
    },
    SiteSeed {
        id: "5",
        name: "Mysore Palace",
        location: "Mysore, Karnataka",
        description: "Magnificent royal palace known for its Indo-Saracenic architecture and grandeur.",
        image: "https://images.unsplash.com/photo-1598197748619-6f6280c5ae00?w=800&q=80",
        category: SiteCategory::Palace,
        state: "Karnataka",
        year_built: "1912",
        significance: "One of India's most visited monuments",
    },
    SiteSeed {
        id: "6",
        name: "Konark Sun Temple",
        location: "Konark, Odisha",
        description: "Ancient sun temple designed as a colossal chariot with intricate stone carvings.",
        image: "https://images.unsplash.com/photo-1609920658906-8223bd289001?w=800&q=80",
        category: SiteCategory::Temple,
        state: "Odisha",
        year_built: "1250",
        significance: "UNESCO World Heritage Site and architectural masterpiece",
    },
    SiteSeed {
        id: "7",
        name: "Hampi",
        location: "Hampi, Karnataka",
        description: "Ruins of the Vijayanagara Empire with stunning temples and royal structures.",
        image: "https://images.unsplash.com/photo-1588409006388-5a3ead19ded1?w=800&q=80",
        category: SiteCategory::Monument,
        state: "Karnataka",
        year_built: "14th Century",
        significance: "UNESCO World Heritage Site and ancient capital city",
    },
    SiteSeed {
        id: "8",
        name: "Lotus Temple",
        location: "Delhi",
        description: "Bahá'í House of Worship known for its flower-like architecture and peaceful ambiance.",
        image: "https://images.unsplash.com/photo-1587474260584-136574528ed5?w=800&q=80",
        category: SiteCategory::Temple,
        state: "Delhi",
        year_built: "1986",
        significance: "Modern architectural marvel and place of worship",
    },
    SiteSeed {
        id: "9",
        name: "Qutub Minar",
        location: "Delhi",
        description: "Tallest brick minaret in the world, a masterpiece of Indo-Islamic architecture.",
        image: "https://images.unsplash.com/photo-1587474260584-136574528ed5?w=800&q=80",
        category: SiteCategory::Monument,
        state: "Delhi",
        year_built: "1192",
        significance: "UNESCO World Heritage Site and iconic Delhi landmark",
    },
    SiteSeed {
        id: "10",
        name: "Amber Fort",
        location: "Jaipur, Rajasthan",
        description: "Majestic fort palace with stunning mirror work and panoramic views.",
        image: "https://images.unsplash.com/photo-1599661046289-e31897846e41?w=800&q=80",
        category: SiteCategory::Fort,
        state: "Rajasthan",
        year_built: "1592",
        significance: "UNESCO World Heritage Site and epitome of Rajput architecture",
    },
    SiteSeed {
        id: "11",
        name: "Ajanta Caves",
        location: "Aurangabad, Maharashtra",
        description: "Ancient Buddhist cave monuments with exquisite paintings and sculptures.",
        image: "https://images.unsplash.com/photo-1609920658906-8223bd289001?w=800&q=80",
        category: SiteCategory::Monument,
        state: "Maharashtra",
        year_built: "2nd Century BCE",
        significance: "UNESCO World Heritage Site and ancient Buddhist art masterpiece",
    },
    SiteSeed {
        id: "12",
        name: "Golden Temple",
        location: "Amritsar, Punjab",
        description: "The holiest Sikh shrine with stunning golden architecture and sacred pool.",
        image: "https://images.unsplash.com/photo-1631019465419-786e93f58f87?w=800&q=80",
        category: SiteCategory::Temple,
        state: "Punjab",
        year_built: "1604",
        significance: "Most sacred Sikh pilgrimage site and symbol of equality",
    },
    SiteSeed {
        id: "13",
        name: "Meenakshi Temple",
        location: "Madurai, Tamil Nadu",
        description: "Historic Hindu temple with towering gopurams covered in thousands of colorful sculptures.",
        image: "https://images.unsplash.com/photo-1582510003544-4d00b7f74220?w=800&q=80",
        category: SiteCategory::Temple,
        state: "Tamil Nadu",
        year_built: "17th Century",
        significance: "Major pilgrimage site and Dravidian architecture masterpiece",
    },
    SiteSeed {
        id: "14",
        name: "Charminar",
        location: "Hyderabad, Telangana",
        description: "Iconic monument and mosque with four grand arches, symbol of Hyderabad.",
        image: "https://images.unsplash.com/photo-1609920658906-8223bd289001?w=800&q=80",
        category: SiteCategory::Monument,
        state: "Telangana",
        year_built: "1591",
        significance: "Symbol of Hyderabad and Indo-Islamic architecture",
    },
    SiteSeed {
        id: "15",
        name: "Victoria Memorial",
        location: "Kolkata, West Bengal",
        description: "Grand marble building dedicated to Queen Victoria, now a museum.",
        image: "https://images.unsplash.com/photo-1558431382-27e303142255?w=800&q=80",
        category: SiteCategory::Monument,
        state: "West Bengal",
        year_built: "1921",
        significance: "Colonial heritage and major tourist attraction",
    },
    SiteSeed {
        id: "16",
        name: "Khajuraho Temples",
        location: "Khajuraho, Madhya Pradesh",
        description: "Group of Hindu and Jain temples famous for intricate erotic sculptures.",
        image: "https://images.unsplash.com/photo-1582510003544-4d00b7f74220?w=800&q=80",
        category: SiteCategory::Temple,
        state: "Madhya Pradesh",
        year_built: "950-1050 CE",
        significance: "UNESCO World Heritage Site and pinnacle of temple architecture",
    },
    SiteSeed {
        id: "17",
        name: "Gol Gumbaz",
        location: "Bijapur, Karnataka",
        description: "Mausoleum with the second largest dome in the world and unique acoustics.",
        image: "https://images.unsplash.com/photo-1598197748619-6f6280c5ae00?w=800&q=80",
        category: SiteCategory::Monument,
        state: "Karnataka",
        year_built: "1656",
        significance: "Architectural wonder known for whispering gallery effect",
    },
    SiteSeed {
        id: "18",
        name: "Brihadisvara Temple",
        location: "Thanjavur, Tamil Nadu",
        description: "Magnificent Chola temple with towering vimana, a UNESCO World Heritage Site.",
        image: "https://images.unsplash.com/photo-1582510003544-4d00b7f74220?w=800&q=80",
        category: SiteCategory::Temple,
        state: "Tamil Nadu",
        year_built: "1010",
        significance: "Greatest achievement of Chola architecture",
    },
    SiteSeed {
        id: "19",
        name: "Sanchi Stupa",
        location: "Sanchi, Madhya Pradesh",
        description: "Ancient Buddhist complex with beautifully carved gateways and stupas.",
        image: "https://images.unsplash.com/photo-1609920658906-8223bd289001?w=800&q=80",
        category: SiteCategory::Monument,
        state: "Madhya Pradesh",
        year_built: "3rd Century BCE",
        significance: "UNESCO World Heritage Site and oldest stone structure in India",
    },
    SiteSeed {
        id: "20",
        name: "Elephanta Caves",
        location: "Mumbai, Maharashtra",
        description: "Rock-cut cave temples dedicated to Lord Shiva with magnificent sculptures.",
        image: "https://images.unsplash.com/photo-1582510003544-4d00b7f74220?w=800&q=80",
        category: SiteCategory::Temple,
        state: "Maharashtra",
        year_built: "5th-8th Century",
        significance: "UNESCO World Heritage Site with iconic Trimurti sculpture",
    },
];

static BUILTIN_SITES: OnceLock<Vec<HeritageSite>> = OnceLock::new();
static BUILTIN_CATEGORIES: OnceLock<Vec<CategoryInfo>> = OnceLock::new();

/// Returns all built-in heritage sites in display order.
pub fn builtin_sites() -> &'static [HeritageSite] {
    BUILTIN_SITES.get_or_init(|| SITE_SEEDS.iter().map(SiteSeed::to_site).collect())
}

/// Returns the category chips, starting with "All Sites".
pub fn builtin_categories() -> &'static [CategoryInfo] {
    BUILTIN_CATEGORIES.get_or_init(default_categories)
}

/// [`CatalogSource`] over the built-in sites.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl CatalogSource for BuiltinCatalog {
    fn sites(&self) -> &[HeritageSite] {
        builtin_sites()
    }

    fn categories(&self) -> &[CategoryInfo] {
        builtin_categories()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanskriti_core::catalog::{SiteQuery, distinct_states};
    use std::collections::HashSet;

    #[test]
    fn test_builtin_sites_have_unique_ids() {
        let sites = builtin_sites();
        assert_eq!(sites.len(), 20);
        let ids: HashSet<&str> = sites.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), sites.len());
    }

    #[test]
    fn test_find() {
        let catalog = BuiltinCatalog;
        let site = catalog.find("12").unwrap();
        assert_eq!(site.name, "Golden Temple");
        assert_eq!(site.category, SiteCategory::Temple);
        assert_eq!(site.year_built.as_deref(), Some("1604"));
        assert!(catalog.find("999").is_none());
    }

    #[test]
    fn test_search_delhi_monuments() {
        let catalog = BuiltinCatalog;
        let query = SiteQuery::new()
            .with_text("delhi")
            .with_category(SiteCategory::Monument);
        let names: Vec<&str> = catalog.search(&query).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Qutub Minar"]);
    }

    #[test]
    fn test_categories_and_states() {
        let catalog = BuiltinCatalog;
        assert_eq!(catalog.categories().len(), 6);
        let states = distinct_states(catalog.sites());
        assert_eq!(states[0], "Uttar Pradesh");
        assert!(states.contains(&"Tamil Nadu"));
    }
}
