//! Category and free-text filtering over the catalog.

use super::model::Product;

/// An empty category filter matches everything.
pub fn matches_category(product: &Product, category: &str) -> bool {
    category.is_empty() || product.category == category
}

/// Case-insensitive substring match against name, brand and description.
///
/// `query` is expected to be trimmed and lowercased already.
pub fn matches_query(product: &Product, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let haystack = format!(
        "{} {} {}",
        product.name, product.brand, product.description
    )
    .to_lowercase();
    haystack.contains(query)
}

/// Applies both filters, preserving catalog order.
pub fn filter<'a>(all: &'a [Product], category: &str, query: &str) -> Vec<&'a Product> {
    let query = query.trim().to_lowercase();
    all.iter()
        .filter(|product| matches_category(product, category) && matches_query(product, &query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, brand: &str, category: &str, description: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            brand: brand.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            image: String::new(),
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product(1, "Hydrating Cleanser", "CeraVe", "cleanser", "Gentle foaming wash"),
            product(2, "Revitalift Serum", "L'Oreal Paris", "skincare", "Vitamin C serum"),
            product(3, "Elvive Shampoo", "L'Oreal Paris", "haircare", "Repairs damaged hair"),
            product(4, "Night Cream", "Garnier", "skincare", "Rich overnight HYDRATION"),
        ]
    }

    #[test]
    fn test_empty_filters_keep_everything_in_order() {
        let all = sample();
        let ids: Vec<i64> = filter(&all, "", "").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_category_only() {
        let all = sample();
        let ids: Vec<i64> = filter(&all, "skincare", "").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_query_is_case_insensitive_across_fields() {
        let all = sample();
        // matches name of 1 and description of 4
        let ids: Vec<i64> = filter(&all, "", "HYDRAT").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 4]);
        // matches brand
        let ids: Vec<i64> = filter(&all, "", "l'oreal").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_query_is_trimmed() {
        let all = sample();
        assert_eq!(filter(&all, "", "   ").len(), 4);
        assert_eq!(filter(&all, "", "  serum ").len(), 1);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let all = sample();
        let ids: Vec<i64> = filter(&all, "haircare", "l'oreal")
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![3]);
        assert!(filter(&all, "cleanser", "serum").is_empty());
    }

    #[test]
    fn test_unknown_category_excludes_everything() {
        let all = sample();
        assert!(filter(&all, "fragrance", "").is_empty());
    }
}
