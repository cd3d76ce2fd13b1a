/// Stock photos keyed by recipe keywords; the first matching row wins
const CATEGORY_IMAGES: &[(&[&str], &str)] = &[
    (
        &["chicken"],
        "https://images.unsplash.com/photo-1604503468506-a8da13d82791?w=400&h=300&fit=crop",
    ),
    (
        &["pasta"],
        "https://images.unsplash.com/photo-1621996346565-e3dbc353d2e5?w=400&h=300&fit=crop",
    ),
    (
        &["asian", "stir"],
        "https://images.unsplash.com/photo-1603133872878-684f208fb84b?w=400&h=300&fit=crop",
    ),
    (
        &["vegetarian", "vegan"],
        "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?w=400&h=300&fit=crop",
    ),
    (
        &["taco", "mexican"],
        "https://images.unsplash.com/photo-1565299585323-38d6b0865b47?w=400&h=300&fit=crop",
    ),
    (
        &["fish", "salmon"],
        "https://images.unsplash.com/photo-1467003909585-2f8a72700288?w=400&h=300&fit=crop",
    ),
    (
        &["cake", "cookie", "dessert"],
        "https://images.unsplash.com/photo-1578985545062-69928b1d9587?w=400&h=300&fit=crop",
    ),
    (
        &["breakfast", "pancake"],
        "https://images.unsplash.com/photo-1567620905732-2d1ec7ab7445?w=400&h=300&fit=crop",
    ),
    (
        &["salad"],
        "https://images.unsplash.com/photo-1540420773420-3366772f4999?w=400&h=300&fit=crop",
    ),
    (
        &["soup"],
        "https://images.unsplash.com/photo-1547592166-23ac45744acd?w=400&h=300&fit=crop",
    ),
    (
        &["pizza"],
        "https://images.unsplash.com/photo-1565299624946-b28f40a0ae38?w=400&h=300&fit=crop",
    ),
    (
        &["burger"],
        "https://images.unsplash.com/photo-1568901346375-23c9450c58cd?w=400&h=300&fit=crop",
    ),
    (
        &["steak", "beef"],
        "https://images.unsplash.com/photo-1600891964092-4316c288032e?w=400&h=300&fit=crop",
    ),
];

pub const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?w=400&h=300&fit=crop";

/// Stock image for a recipe, chosen from its title and ingredients
pub fn fallback_image(title: &str, ingredients: &[String]) -> &'static str {
    let text = std::iter::once(title)
        .chain(ingredients.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    CATEGORY_IMAGES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, url)| *url)
        .unwrap_or(DEFAULT_IMAGE)
}
