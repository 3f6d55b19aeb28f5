use crate::error::{ToolkitError, ToolkitResult};

/// A product theme: id used in exported models, display label, three-color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    pub id: &'static str,
    pub label: &'static str,
    pub palette: [&'static str; 3],
}

const PRODUCTS: &[Product] = &[
    Product { id: "jetbrains", label: "JetBrains", palette: ["#9151e1", "#ec4476", "#fde74a"] },
    Product { id: "intellij-idea", label: "IntelliJ IDEA", palette: ["#087cfa", "#fe315d", "#f97a12"] },
    Product { id: "phpstorm", label: "PhpStorm", palette: ["#b24eee", "#7660f4", "#fc378c"] },
    Product { id: "pycharm", label: "PyCharm", palette: ["#21d789", "#fcf84a", "#07c3f2"] },
    Product { id: "rubymine", label: "RubyMine", palette: ["#fc2555", "#fd8638", "#8f41cd"] },
    Product { id: "webstorm", label: "WebStorm", palette: ["#22cdd6", "#2888d4", "#feee56"] },
    Product { id: "clion", label: "CLion", palette: ["#32d791", "#1a9edd", "#ea3a8c"] },
    Product { id: "datagrip", label: "DataGrip", palette: ["#32d791", "#9779f5", "#fd5fe4"] },
    Product { id: "appcode", label: "AppCode", palette: ["#2b7fe3", "#25daee", "#30de95"] },
    Product { id: "goland", label: "GoLand", palette: ["#078efc", "#bb4efc", "#3bea62"] },
    Product { id: "resharper", label: "ReSharper", palette: ["#c21456", "#e14ce3", "#fdbc2c"] },
    Product { id: "resharper-cpp", label: "ReSharper C++", palette: ["#fdbc2c", "#e14ce3", "#c21456"] },
    Product { id: "dotcover", label: "dotCover", palette: ["#fd7522", "#786bfb", "#e14ce3"] },
    Product { id: "dotmemory", label: "dotMemory", palette: ["#fdbc2c", "#786bfb", "#e14ce3"] },
    Product { id: "dotpeek", label: "dotPeek", palette: ["#23cbfc", "#786bfb", "#e14ce3"] },
    Product { id: "dottrace", label: "dotTrace", palette: ["#fc1681", "#786bfb", "#e14ce3"] },
    Product { id: "rider", label: "Rider", palette: ["#c40b55", "#e800ca", "#ffbd00"] },
    Product { id: "teamcity", label: "TeamCity", palette: ["#22b1ef", "#9062f7", "#46e869"] },
    Product { id: "youtrack", label: "YouTrack", palette: ["#22b1ef", "#9062f7", "#fc378c"] },
    Product { id: "upsource", label: "Upsource", palette: ["#22b1ef", "#9062f7", "#fd8224"] },
    Product { id: "hub", label: "Hub", palette: ["#1fb9ee", "#965ff7", "#feec56"] },
    Product { id: "kotlin", label: "Kotlin", palette: ["#1b84f2", "#24dea7", "#ed4baa"] },
    Product { id: "mps", label: "MPS", palette: ["#31d68b", "#3188cd", "#f1e969"] },
];

impl Product {
    pub fn all() -> &'static [Product] {
        PRODUCTS
    }

    pub fn default_id() -> &'static str {
        PRODUCTS[0].id
    }
}

pub fn product_by_id(id: &str) -> ToolkitResult<&'static Product> {
    PRODUCTS
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| ToolkitError::lookup("product id", id))
}

pub fn product_by_label(label: &str) -> ToolkitResult<&'static Product> {
    PRODUCTS
        .iter()
        .find(|p| p.label == label)
        .ok_or_else(|| ToolkitError::lookup("product label", label))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::color::Rgba;

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<&str> = Product::all().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), Product::all().len());
        assert_eq!(Product::all().len(), 23);
    }

    #[test]
    fn palettes_parse() {
        for p in Product::all() {
            for c in p.palette {
                Rgba::parse(c).unwrap_or_else(|e| panic!("{}: {e}", p.id));
            }
        }
    }

    #[test]
    fn lookup_by_id_and_label() {
        assert_eq!(product_by_id("kotlin").unwrap().label, "Kotlin");
        assert_eq!(product_by_label("ReSharper C++").unwrap().id, "resharper-cpp");
        assert_eq!(Product::default_id(), "jetbrains");
    }

    #[test]
    fn unknown_product_is_lookup_error() {
        assert!(product_by_id("gogland").unwrap_err().is_lookup());
        assert!(product_by_label("Fleet").unwrap_err().is_lookup());
    }
}
