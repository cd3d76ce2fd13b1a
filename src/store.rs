use crate::error::HarvestError;
use crate::model::ExtractedRecipe;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// A record together with the id its store assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecipe {
    pub id: u64,
    #[serde(flatten)]
    pub recipe: ExtractedRecipe,
}

/// Receives harvested records and assigns each an id
pub trait RecipeStore {
    /// Persist `recipe` and return its id; ids start at 1 and increase by one
    fn insert(&mut self, recipe: &ExtractedRecipe) -> Result<u64, HarvestError>;
}

fn check_insertable(recipe: &ExtractedRecipe) -> Result<(), HarvestError> {
    if recipe.is_valid() {
        Ok(())
    } else {
        Err(HarvestError::Store(format!(
            "'{}' needs at least two ingredients and one instruction",
            recipe.title
        )))
    }
}

/// Store every record in order, returning them with their ids
pub fn save_all(
    store: &mut dyn RecipeStore,
    recipes: &[ExtractedRecipe],
) -> Result<Vec<StoredRecipe>, HarvestError> {
    recipes
        .iter()
        .map(|recipe| {
            store.insert(recipe).map(|id| StoredRecipe {
                id,
                recipe: recipe.clone(),
            })
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<StoredRecipe>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[StoredRecipe] {
        &self.records
    }
}

impl RecipeStore for MemoryStore {
    fn insert(&mut self, recipe: &ExtractedRecipe) -> Result<u64, HarvestError> {
        check_insertable(recipe)?;
        let id = self.records.len() as u64 + 1;
        self.records.push(StoredRecipe {
            id,
            recipe: recipe.clone(),
        });
        Ok(id)
    }
}

/// Writes each record as one JSON object per line
pub struct JsonLinesStore<W: Write> {
    writer: W,
    next_id: u64,
}

impl<W: Write> JsonLinesStore<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, next_id: 1 }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecipeStore for JsonLinesStore<W> {
    fn insert(&mut self, recipe: &ExtractedRecipe) -> Result<u64, HarvestError> {
        check_insertable(recipe)?;
        let id = self.next_id;
        let stored = StoredRecipe {
            id,
            recipe: recipe.clone(),
        };
        serde_json::to_writer(&mut self.writer, &stored)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.next_id += 1;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(title: &str) -> ExtractedRecipe {
        ExtractedRecipe {
            title: title.to_string(),
            ingredients: vec!["1 cup rice".to_string(), "2 cups water".to_string()],
            instructions: vec!["Simmer the rice for 18 minutes.".to_string()],
            image_url: Some("https://example.com/rice.jpg".to_string()),
            source_url: "https://example.com/rice".to_string(),
        }
    }

    #[test]
    fn test_memory_store_sequential_ids() {
        let mut store = MemoryStore::new();
        assert_eq!(store.insert(&recipe("Rice")).unwrap(), 1);
        assert_eq!(store.insert(&recipe("More Rice")).unwrap(), 2);
        assert_eq!(store.records()[1].recipe.title, "More Rice");
    }

    #[test]
    fn test_invalid_record_rejected() {
        let mut store = MemoryStore::new();
        let mut thin = recipe("Thin");
        thin.ingredients.truncate(1);
        assert!(matches!(store.insert(&thin), Err(HarvestError::Store(_))));
        assert!(store.records().is_empty());
    }

    #[test]
    fn test_json_lines_output() {
        let mut store = JsonLinesStore::new(Vec::new());
        let saved = save_all(&mut store, &[recipe("Rice"), recipe("Pilaf")]).unwrap();
        assert_eq!(saved.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 2]);

        let output = String::from_utf8(store.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], 1);
        assert_eq!(first["title"], "Rice");
        assert_eq!(first["ingredients"][1], "2 cups water");

        let second: StoredRecipe = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(second.recipe.title, "Pilaf");
    }
}
