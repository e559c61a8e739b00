use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::pagination::{default_page_number, default_page_size, PageRequest};
use crate::shared::query::{QueryFilter, TextMatch};
use crate::shared::validation::non_empty;

/// Query params for listing categories
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryQueryParams {
    #[serde(default = "default_page_number")]
    #[param(minimum = 1)]
    pub page_number: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Substring of the category name
    pub name: Option<String>,

    /// Only direct children of this category
    pub parent_category_id: Option<i64>,

    pub created_at_from: Option<NaiveDate>,
    pub created_at_to: Option<NaiveDate>,
}

impl CategoryQueryParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page_number, self.page_size)
    }

    pub fn to_filter(&self, text_match: TextMatch) -> QueryFilter {
        QueryFilter::new(text_match)
            .contains("name", self.name.as_deref())
            .equals("parent_category_id", self.parent_category_id)
            .created_between(self.created_at_from, self.created_at_to)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CategoryRequestDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    pub parent_category_id: Option<i64>,
}

/// Partial update. `parent_category_id` is applied only when present.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PatchCategoryDto {
    #[validate(length(max = 100, message = "Name must not exceed 100 characters"))]
    pub name: Option<String>,

    pub parent_category_id: Option<i64>,
}

impl PatchCategoryDto {
    pub fn normalized(self) -> Self {
        Self {
            name: non_empty(self.name),
            parent_category_id: self.parent_category_id,
        }
    }
}

/// Direct child as shown inside a category response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategorySummaryDto {
    pub id: i64,
    pub name: String,
}

impl From<&Category> for CategorySummaryDto {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
        }
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
    pub parent_category_id: Option<i64>,
    /// Non-deleted direct children
    pub sub_categories: Vec<CategorySummaryDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CategoryResponseDto {
    pub fn new(category: Category, sub_categories: Vec<CategorySummaryDto>) -> Self {
        Self {
            id: category.id,
            name: category.name,
            parent_category_id: category.parent_category_id,
            sub_categories,
            created_at: category.audit.created_at,
            updated_at: category.audit.updated_at,
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: i64,
    pub name: String,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    /// Build tree from flat list of categories.
    ///
    /// Categories whose parent is not in the list become roots. Siblings keep
    /// the order of the input.
    pub fn build_tree(categories: &[Category]) -> Vec<CategoryTreeDto> {
        let ids: HashSet<i64> = categories.iter().map(|c| c.id).collect();

        let mut children: HashMap<i64, Vec<&Category>> = HashMap::new();
        let mut roots = Vec::new();
        for category in categories {
            match category.parent_category_id {
                Some(parent) if ids.contains(&parent) && parent != category.id => {
                    children.entry(parent).or_default().push(category)
                }
                _ => roots.push(category),
            }
        }

        let mut visited = HashSet::new();
        roots
            .into_iter()
            .map(|root| Self::build_node(root, &children, &mut visited))
            .collect()
    }

    fn build_node(
        category: &Category,
        children: &HashMap<i64, Vec<&Category>>,
        visited: &mut HashSet<i64>,
    ) -> CategoryTreeDto {
        visited.insert(category.id);

        let mut nodes = Vec::new();
        for kid in children.get(&category.id).into_iter().flatten() {
            if !visited.contains(&kid.id) {
                nodes.push(Self::build_node(kid, children, visited));
            }
        }

        CategoryTreeDto {
            id: category.id,
            name: category.name.clone(),
            children: nodes,
        }
    }
}

/// Direct children of every parent in `categories`, in input order
pub fn children_index(categories: &[Category]) -> HashMap<i64, Vec<CategorySummaryDto>> {
    let mut index: HashMap<i64, Vec<CategorySummaryDto>> = HashMap::new();
    for category in categories {
        if let Some(parent) = category.parent_category_id {
            index.entry(parent).or_default().push(category.into());
        }
    }
    index
}
