//! Built-in Lumina collection.
//!
//! The storefront ships with a fixed catalog; there is no product admin.

use super::model::{Category, Product};

pub const BRAND_NAME: &str = "LUMINA STYLE";
pub const TAGLINE: &str = "Style Meets Strength";

/// How the shop is addressed in order messages.
pub const ORDER_GREETING_NAME: &str = "Lumina Style";

/// WhatsApp number that receives order inquiries.
pub const WHATSAPP_NUMBER: &str = "1234567890";

/// Order form for shoppers who prefer not to use WhatsApp.
pub const GOOGLE_FORM_URL: &str = "https://docs.google.com/forms/d/e/1FAIpQLSfD_.../viewform";

/// Size scale offered for every product.
pub const SIZES: [&str; 5] = ["S", "M", "L", "XL", "XXL"];

/// Size preselected in the product view.
pub const DEFAULT_SIZE: &str = "M";

fn colors(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Returns the built-in product list in display order.
pub fn builtin_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            name: "Midnight Silk Wrap Dress".to_string(),
            price: "$89.00".to_string(),
            category: Category::Dresses,
            image: "https://images.unsplash.com/photo-1595777457583-95e059d581b8?q=80&w=800&auto=format&fit=crop".to_string(),
            description: "Elegant evening wrap dress with a subtle sheen, perfect for sunset dinners and social events.".to_string(),
            fabric: "Premium Mulberry Silk Blend".to_string(),
            care: "Dry clean only. Do not bleach.".to_string(),
            colors: colors(&["Midnight Blue", "Emerald Green", "Rose Gold"]),
        },
        Product {
            id: "2".to_string(),
            name: "Aura Seamless Leggings".to_string(),
            price: "$55.00".to_string(),
            category: Category::GymWear,
            image: "https://images.unsplash.com/photo-1506629082955-511b1aa562c8?q=80&w=800&auto=format&fit=crop".to_string(),
            description: "High-waisted, squat-proof leggings with moisture-wicking technology for intense workouts.".to_string(),
            fabric: "80% Nylon, 20% Spandex".to_string(),
            care: "Machine wash cold with like colors. Tumble dry low.".to_string(),
            colors: colors(&["Stone Gray", "Sage Green", "Jet Black"]),
        },
        Product {
            id: "3".to_string(),
            name: "Zen Flow Yoga Set".to_string(),
            price: "$75.00".to_string(),
            category: Category::YogaFitness,
            image: "https://images.unsplash.com/photo-1518310321115-5a982ad340bc?q=80&w=800&auto=format&fit=crop".to_string(),
            description: "Two-piece ribbed set designed for maximum flexibility and comfort during your yoga flow.".to_string(),
            fabric: "Ribbed Eco-Cotton Blend".to_string(),
            care: "Gentle cycle wash. Air dry recommended.".to_string(),
            colors: colors(&["Lavender", "Dusty Rose", "Oatmeal"]),
        },
        Product {
            id: "4".to_string(),
            name: "Urban Oversized Blazer".to_string(),
            price: "$120.00".to_string(),
            category: Category::TopsBottoms,
            image: "https://images.unsplash.com/photo-1591047139829-d91aecb6caea?q=80&w=800&auto=format&fit=crop".to_string(),
            description: "A versatile essential for the modern wardrobe. Tailored fit with a relaxed feel.".to_string(),
            fabric: "Structured Wool Blend".to_string(),
            care: "Steam iron only. Professional dry clean.".to_string(),
            colors: colors(&["Charcoal", "Beige", "Cream"]),
        },
        Product {
            id: "5".to_string(),
            name: "Ethereal Lace Bralette Set".to_string(),
            price: "$45.00".to_string(),
            category: Category::Lingerie,
            image: "https://images.unsplash.com/photo-1582533561751-ef6f6ab93a2e?q=80&w=800&auto=format&fit=crop".to_string(),
            description: "Intricately designed floral lace with adjustable straps and soft mesh lining for daily luxury.".to_string(),
            fabric: "Soft French Lace & Silk Organza".to_string(),
            care: "Hand wash only. Lay flat to dry.".to_string(),
            colors: colors(&["Pearl White", "Dusty Rose", "Noir"]),
        },
        Product {
            id: "6".to_string(),
            name: "Satin Muse Slip Gown".to_string(),
            price: "$65.00".to_string(),
            category: Category::Lingerie,
            image: "https://images.unsplash.com/photo-1620799140408-edc6dcb6d633?q=80&w=800&auto=format&fit=crop".to_string(),
            description: "A bias-cut satin slip that skims the body perfectly. Minimalist elegance for your quiet hours.".to_string(),
            fabric: "100% High-Grade Vegan Satin".to_string(),
            care: "Cool iron on reverse. Hand wash recommended.".to_string(),
            colors: colors(&["Champagne", "Mauve", "Midnight"]),
        },
        Product {
            id: "7".to_string(),
            name: "Celine Belted Jumpsuit".to_string(),
            price: "$110.00".to_string(),
            category: Category::Jumpsuits,
            image: "https://images.unsplash.com/photo-1515886657613-9f3515b0c78f?q=80&w=800&auto=format&fit=crop".to_string(),
            description: "A sophisticated one-piece featuring a cinched waist and wide-leg silhouette. Effortless day-to-night transitions.".to_string(),
            fabric: "Breathable Linen-Tencel Blend".to_string(),
            care: "Machine wash delicate. Low heat tumble dry.".to_string(),
            colors: colors(&["Terracotta", "Olive Green", "Soft Sand"]),
        },
        Product {
            id: "8".to_string(),
            name: "Active Tech Bodysuit".to_string(),
            price: "$95.00".to_string(),
            category: Category::Jumpsuits,
            image: "https://images.unsplash.com/photo-1516062423079-7ca13cdc7f5a?q=80&w=800&auto=format&fit=crop".to_string(),
            description: "High-performance compression jumpsuit designed for high-impact training and aesthetic edge.".to_string(),
            fabric: "Signature 'Strength' Microfiber".to_string(),
            care: "Wash cold. No fabric softeners.".to_string(),
            colors: colors(&["Graphite", "Cobalt", "Black"]),
        },
    ]
}
