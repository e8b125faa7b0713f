// 🇮🇳 Sample Catalog - Indian rupee coins
// Bundled reference data used when no catalog file is configured

use crate::coin::{CoinRecord, CoinStatus, COMMEMORATIVE_ISSUE, REGULAR_ISSUE};

/// The six bundled sample coins, in display order
pub fn sample_coins() -> Vec<CoinRecord> {
    vec![
        // 1. ₹10 bimetallic
        CoinRecord {
            id: "1".to_string(),
            name: "New Rupee Symbol ₹10 Coin".to_string(),
            denomination: "₹10".to_string(),
            mint_city: "Mumbai".to_string(),
            status: CoinStatus::Active,
            issue_type: REGULAR_ISSUE.to_string(),
            commemorative_note: None,
            year: 2011,
            series: "New Symbol Series".to_string(),
            metal: "Bimetallic (Outer: Nickel-Brass, Center: Nickel-Silver)".to_string(),
            weight: 7.71,
            diameter: 27.0,
            thickness: Some(2.25),
            shape: "Circular".to_string(),
            edge_design: "Reeded".to_string(),
            mint_mark: "Mumbai •".to_string(),
            obverse_image: "https://images.unsplash.com/photo-1621416894569-0f39ed31d247?w=400&h=400&fit=crop".to_string(),
            reverse_image: "https://images.unsplash.com/photo-1605792657660-596af9009e82?w=400&h=400&fit=crop".to_string(),
            obverse_description: "Ashoka Pillar with Lion Capital, 'भारत' and 'INDIA' inscribed below, with year of issue".to_string(),
            reverse_description: "₹10 denomination in center, with stylized floral pattern, '₹' symbol on left".to_string(),
            security_features: Some("Bimetallic composition, micro-lettering, reeded edge".to_string()),
        },
        // 2. ₹5 nickel-brass
        CoinRecord {
            id: "2".to_string(),
            name: "₹5 Nickel-Brass Coin".to_string(),
            denomination: "₹5".to_string(),
            mint_city: "Hyderabad".to_string(),
            status: CoinStatus::Active,
            issue_type: REGULAR_ISSUE.to_string(),
            commemorative_note: None,
            year: 2009,
            series: "Unity in Diversity Series".to_string(),
            metal: "Nickel-Brass".to_string(),
            weight: 6.0,
            diameter: 23.0,
            thickness: Some(1.9),
            shape: "Circular".to_string(),
            edge_design: "Plain with 'भारत INDIA' inscription".to_string(),
            mint_mark: "Hyderabad ★".to_string(),
            obverse_image: "https://images.unsplash.com/photo-1621504450181-5d356f61d307?w=400&h=400&fit=crop".to_string(),
            reverse_image: "https://images.unsplash.com/photo-1621416894569-0f39ed31d247?w=400&h=400&fit=crop".to_string(),
            obverse_description: "Ashoka Pillar with three lions visible, denomination below".to_string(),
            reverse_description: "Agricultural symbol with crossed grain stalks, value 5 prominently displayed".to_string(),
            security_features: Some("Edge inscription, distinctive weight".to_string()),
        },
        // 3. ₹2 ferritic stainless steel
        CoinRecord {
            id: "3".to_string(),
            name: "₹2 Ferritic Stainless Steel".to_string(),
            denomination: "₹2".to_string(),
            mint_city: "Noida".to_string(),
            status: CoinStatus::Active,
            issue_type: REGULAR_ISSUE.to_string(),
            commemorative_note: None,
            year: 2011,
            series: "New Symbol Series".to_string(),
            metal: "Ferritic Stainless Steel".to_string(),
            weight: 4.85,
            diameter: 25.0,
            thickness: Some(1.61),
            shape: "Circular".to_string(),
            edge_design: "Plain".to_string(),
            mint_mark: "Noida ◆".to_string(),
            obverse_image: "https://images.unsplash.com/photo-1605792657660-596af9009e82?w=400&h=400&fit=crop".to_string(),
            reverse_image: "https://images.unsplash.com/photo-1621504450181-5d356f61d307?w=400&h=400&fit=crop".to_string(),
            obverse_description: "Ashoka Pillar with Lion Capital, 'भारत INDIA' and year".to_string(),
            reverse_description: "₹2 with new rupee symbol, cross pattern in background".to_string(),
            security_features: Some("Stainless steel magnetic properties, unique weight-diameter ratio".to_string()),
        },
        // 4. ₹20 Gandhi commemorative
        CoinRecord {
            id: "4".to_string(),
            name: "₹20 Commemorative - Mahatma Gandhi".to_string(),
            denomination: "₹20".to_string(),
            mint_city: "Mumbai".to_string(),
            status: CoinStatus::Discontinued,
            issue_type: COMMEMORATIVE_ISSUE.to_string(),
            commemorative_note: Some("150th Birth Anniversary of Mahatma Gandhi".to_string()),
            year: 2019,
            series: "150th Birth Anniversary".to_string(),
            metal: "Nickel-Silver".to_string(),
            weight: 8.54,
            diameter: 27.0,
            thickness: Some(2.0),
            shape: "Circular".to_string(),
            edge_design: "Security edge with micro-text".to_string(),
            mint_mark: "Mumbai •".to_string(),
            obverse_image: "https://images.unsplash.com/photo-1621416894569-0f39ed31d247?w=400&h=400&fit=crop".to_string(),
            reverse_image: "https://images.unsplash.com/photo-1605792657660-596af9009e82?w=400&h=400&fit=crop".to_string(),
            obverse_description: "Portrait of Mahatma Gandhi with spectacles, 'बापू' inscription".to_string(),
            reverse_description: "₹20 denomination with ashoka chakra, commemorative text".to_string(),
            security_features: Some("Enhanced security edge, special metal composition, embossed portrait".to_string()),
        },
        // 5. ₹1 stainless steel
        CoinRecord {
            id: "5".to_string(),
            name: "₹1 Stainless Steel Coin".to_string(),
            denomination: "₹1".to_string(),
            mint_city: "Kolkata".to_string(),
            status: CoinStatus::Active,
            issue_type: REGULAR_ISSUE.to_string(),
            commemorative_note: None,
            year: 2011,
            series: "New Symbol Series".to_string(),
            metal: "Stainless Steel".to_string(),
            weight: 3.79,
            diameter: 21.93,
            thickness: Some(1.45),
            shape: "Circular".to_string(),
            edge_design: "Plain".to_string(),
            mint_mark: "Kolkata (no mark)".to_string(),
            obverse_image: "https://images.unsplash.com/photo-1621504450181-5d356f61d307?w=400&h=400&fit=crop".to_string(),
            reverse_image: "https://images.unsplash.com/photo-1621416894569-0f39ed31d247?w=400&h=400&fit=crop".to_string(),
            obverse_description: "Ashoka Pillar with lions, 'भारत' and 'INDIA' below, year of issue".to_string(),
            reverse_description: "₹1 with new rupee symbol (₹), stylized grain stalks pattern".to_string(),
            security_features: Some("Tactile identification mark for visually impaired (lines on obverse)".to_string()),
        },
        // 6. ₹75 Azadi Ka Amrit Mahotsav commemorative
        CoinRecord {
            id: "6".to_string(),
            name: "75 Years of Independence ₹75 Commemorative".to_string(),
            denomination: "₹75".to_string(),
            mint_city: "Mumbai".to_string(),
            status: CoinStatus::Discontinued,
            issue_type: COMMEMORATIVE_ISSUE.to_string(),
            commemorative_note: Some("75 Years of Independence - Azadi Ka Amrit Mahotsav".to_string()),
            year: 2022,
            series: "Azadi Ka Amrit Mahotsav".to_string(),
            metal: "Quaternary Alloy (4 metals)".to_string(),
            weight: 35.0,
            diameter: 44.0,
            thickness: Some(3.5),
            shape: "Circular".to_string(),
            edge_design: "Inscribed with special text".to_string(),
            mint_mark: "Mumbai •".to_string(),
            obverse_image: "https://images.unsplash.com/photo-1605792657660-596af9009e82?w=400&h=400&fit=crop".to_string(),
            reverse_image: "https://images.unsplash.com/photo-1621504450181-5d356f61d307?w=400&h=400&fit=crop".to_string(),
            obverse_description: "Tricolor flag with Ashoka Chakra, '75' in Devanagari and English".to_string(),
            reverse_description: "Map of India with unity themes, 'आजादी का अमृत महोत्सव' inscription".to_string(),
            security_features: Some("Limited edition, special 4-metal alloy, edge inscription, holographic elements".to_string()),
        },
    ]
}
