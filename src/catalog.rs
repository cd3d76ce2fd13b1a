//! Hand-written recipes returned when no source produced anything.

use crate::model::ExtractedRecipe;

struct CatalogEntry {
    tags: &'static [&'static str],
    title: &'static str,
    ingredients: &'static [&'static str],
    instructions: &'static [&'static str],
    image_url: &'static str,
    source_url: &'static str,
}

impl CatalogEntry {
    fn to_recipe(&self) -> ExtractedRecipe {
        ExtractedRecipe {
            title: self.title.to_string(),
            ingredients: self.ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: self.instructions.iter().map(|s| s.to_string()).collect(),
            image_url: Some(self.image_url.to_string()),
            source_url: self.source_url.to_string(),
        }
    }
}

/// Query keyword groups, checked in order; the first group found in the
/// query selects the entries tagged with it
const KEYWORD_GROUPS: &[&[&str]] = &[
    &["chicken"],
    &["pasta"],
    &["stir", "asian"],
    &["vegetarian", "vegan"],
    &["beef", "taco"],
];

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        tags: &["chicken"],
        title: "Grilled Chicken Breast",
        ingredients: &[
            "4 boneless, skinless chicken breasts",
            "2 tablespoons olive oil",
            "1 teaspoon salt",
            "1/2 teaspoon black pepper",
            "1 teaspoon garlic powder",
            "1 teaspoon dried oregano",
        ],
        instructions: &[
            "Preheat grill to medium-high heat",
            "Brush chicken breasts with olive oil",
            "Season with salt, pepper, garlic powder, and oregano",
            "Grill for 6-8 minutes per side until internal temperature reaches 165°F",
            "Let rest for 5 minutes before serving",
        ],
        image_url: "https://images.unsplash.com/photo-1604503468506-a8da13d82791?w=400&h=300&fit=crop",
        source_url: "https://example.com/grilled-chicken-breast",
    },
    CatalogEntry {
        tags: &["chicken", "pasta"],
        title: "Creamy Pasta with Chicken",
        ingredients: &[
            "1 pound fettuccine pasta",
            "2 boneless, skinless chicken breasts, cubed",
            "2 tablespoons butter",
            "2 cloves garlic, minced",
            "1 cup heavy cream",
            "1/2 cup grated Parmesan cheese",
            "Salt and pepper to taste",
            "Fresh parsley for garnish",
        ],
        instructions: &[
            "Cook pasta according to package directions",
            "Season chicken with salt and pepper",
            "In a large skillet, melt butter over medium heat",
            "Add chicken and cook until golden brown, about 5-7 minutes",
            "Add garlic and cook for 1 minute",
            "Pour in heavy cream and bring to a simmer",
            "Stir in Parmesan cheese until melted",
            "Add cooked pasta and toss to combine",
            "Garnish with fresh parsley and serve",
        ],
        image_url: "https://images.unsplash.com/photo-1621996346565-e3dbc353d2e5?w=400&h=300&fit=crop",
        source_url: "https://example.com/creamy-pasta-chicken",
    },
    CatalogEntry {
        tags: &["chicken", "stir", "asian"],
        title: "Chicken Stir Fry",
        ingredients: &[
            "1 pound boneless, skinless chicken breast, sliced",
            "2 tablespoons soy sauce",
            "1 tablespoon cornstarch",
            "2 tablespoons vegetable oil",
            "2 cups mixed vegetables (broccoli, bell peppers, carrots)",
            "3 cloves garlic, minced",
            "1 tablespoon ginger, minced",
            "2 tablespoons oyster sauce",
            "1/4 cup chicken broth",
        ],
        instructions: &[
            "Slice chicken and marinate with soy sauce and cornstarch for 15 minutes",
            "Heat oil in a wok or large skillet over high heat",
            "Add chicken and stir-fry until cooked through, about 5 minutes",
            "Remove chicken and set aside",
            "Add vegetables, garlic, and ginger to the wok",
            "Stir-fry vegetables for 3-4 minutes",
            "Return chicken to the wok",
            "Add oyster sauce and chicken broth",
            "Stir-fry for 2 minutes until sauce thickens",
            "Serve hot over rice",
        ],
        image_url: "https://images.unsplash.com/photo-1603133872878-684f208fb84b?w=400&h=300&fit=crop",
        source_url: "https://example.com/chicken-stir-fry",
    },
    CatalogEntry {
        tags: &["vegetarian", "vegan"],
        title: "Roasted Vegetable Quinoa Bowl",
        ingredients: &[
            "1 cup quinoa, rinsed",
            "2 cups vegetable broth",
            "1 sweet potato, cubed",
            "1 red bell pepper, chopped",
            "1 can chickpeas, drained",
            "2 tablespoons olive oil",
            "1 teaspoon smoked paprika",
            "2 tablespoons tahini",
            "1 lemon, juiced",
        ],
        instructions: &[
            "Preheat oven to 425°F",
            "Toss sweet potato, bell pepper and chickpeas with olive oil and paprika",
            "Roast for 25 minutes, turning once halfway through",
            "Simmer quinoa in vegetable broth for 15 minutes until fluffy",
            "Whisk tahini with lemon juice and a splash of water",
            "Divide quinoa between bowls, top with vegetables and drizzle with dressing",
        ],
        image_url: "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?w=400&h=300&fit=crop",
        source_url: "https://example.com/roasted-vegetable-quinoa-bowl",
    },
    CatalogEntry {
        tags: &["beef", "taco"],
        title: "Beef Tacos",
        ingredients: &[
            "1 pound ground beef",
            "1 packet taco seasoning",
            "8 small corn tortillas",
            "1 cup shredded lettuce",
            "1 cup shredded cheddar cheese",
            "1 tomato, diced",
            "1/2 cup sour cream",
        ],
        instructions: &[
            "Brown the ground beef in a skillet over medium-high heat",
            "Drain the fat, then stir in taco seasoning and 2/3 cup water",
            "Simmer for 5 minutes until thickened",
            "Warm tortillas in a dry pan",
            "Fill tortillas with beef and top with lettuce, cheese, tomato and sour cream",
        ],
        image_url: "https://images.unsplash.com/photo-1565299585323-38d6b0865b47?w=400&h=300&fit=crop",
        source_url: "https://example.com/beef-tacos",
    },
];

/// Up to `max_results` catalog recipes matching the query's first keyword group.
///
/// A query matching no group gets the head of the catalog.
pub fn fallback_recipes(query: &str, max_results: usize) -> Vec<ExtractedRecipe> {
    let query = query.to_lowercase();
    let group = KEYWORD_GROUPS
        .iter()
        .find(|group| group.iter().any(|keyword| query.contains(keyword)));

    let entries: Vec<&CatalogEntry> = match group {
        Some(group) => CATALOG
            .iter()
            .filter(|entry| entry.tags.iter().any(|tag| group.contains(tag)))
            .collect(),
        None => CATALOG.iter().collect(),
    };

    entries
        .into_iter()
        .take(max_results)
        .map(CatalogEntry::to_recipe)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(query: &str, max: usize) -> Vec<String> {
        fallback_recipes(query, max)
            .into_iter()
            .map(|r| r.title)
            .collect()
    }

    #[test]
    fn test_chicken_returns_all_chicken_entries() {
        assert_eq!(
            titles("Chicken recipes", 10),
            vec![
                "Grilled Chicken Breast",
                "Creamy Pasta with Chicken",
                "Chicken Stir Fry"
            ]
        );
    }

    #[test]
    fn test_keyword_groups() {
        assert_eq!(titles("pasta night", 10), vec!["Creamy Pasta with Chicken"]);
        assert_eq!(titles("asian noodles", 10), vec!["Chicken Stir Fry"]);
        assert_eq!(titles("vegan bowls", 10), vec!["Roasted Vegetable Quinoa Bowl"]);
        assert_eq!(titles("taco tuesday", 10), vec!["Beef Tacos"]);
    }

    #[test]
    fn test_first_group_wins() {
        // "chicken" is checked before "pasta"
        assert_eq!(titles("chicken pasta", 10).len(), 3);
    }

    #[test]
    fn test_unmatched_query_gets_catalog_head() {
        assert_eq!(titles("soup", 2), vec!["Grilled Chicken Breast", "Creamy Pasta with Chicken"]);
        assert!(fallback_recipes("soup", 0).is_empty());
    }

    #[test]
    fn test_catalog_records_are_valid() {
        for recipe in fallback_recipes("anything", CATALOG.len()) {
            assert!(recipe.is_valid(), "{}", recipe.title);
            assert!(recipe.image_url.is_some());
        }
    }
}
