//! Product type classification by keyword

type KeywordTable = &'static [(&'static str, &'static [&'static str])];

/// Product types in match order with the keywords that identify them
const PRODUCT_KEYWORDS: KeywordTable = &[
    (
        "clothing",
        &[
            "shirt", "tshirt", "t-shirt", "pants", "jeans", "jacket", "hoodie", "sweater", "dress",
            "skirt", "socks", "underwear", "clothing", "apparel", "shoes", "sneakers", "boots",
            "footwear", "fleece",
        ],
    ),
    (
        "electronics",
        &[
            "phone", "smartphone", "laptop", "computer", "tablet", "headphones", "earbuds",
            "speaker", "television", "tv", "appliance", "electronic", "device", "power", "battery",
            "charger", "cable", "camera",
        ],
    ),
    (
        "food",
        &[
            "food", "beverage", "drink", "snack", "meal", "grocery", "fruit", "vegetable", "meat",
            "dairy", "organic", "supplement",
        ],
    ),
    (
        "home",
        &[
            "furniture", "chair", "table", "desk", "sofa", "couch", "bed", "mattress", "shelf",
            "lamp", "pillow", "blanket", "kitchenware", "utensil", "plate", "bowl", "cup", "mug",
            "towel", "rug", "curtain",
        ],
    ),
    (
        "beauty",
        &[
            "soap", "shampoo", "conditioner", "lotion", "cream", "moisturizer", "makeup",
            "cosmetic", "deodorant", "toothpaste", "brush", "beauty", "skincare", "haircare",
        ],
    ),
    (
        "toys",
        &[
            "toy", "game", "puzzle", "doll", "action figure", "board game", "bike", "bicycle",
            "scooter", "ball", "play",
        ],
    ),
    (
        "outdoor",
        &[
            "tent", "backpack", "sleeping bag", "camping", "hiking", "fishing", "grill", "garden",
            "plant", "pot", "outdoor", "patio", "lawn", "canopy",
        ],
    ),
];

const CLOTHING_SUBTYPES: KeywordTable = &[
    ("hoodie", &["hoodie", "sweatshirt", "pullover"]),
    ("t-shirt", &["t-shirt", "tshirt", "tee", "shirt"]),
    ("jeans", &["jeans", "denim", "pants", "trousers"]),
    ("dress", &["dress", "gown"]),
    ("shoes", &["shoes", "sneakers", "boots", "footwear"]),
    ("jacket", &["jacket", "coat", "outerwear"]),
    ("hat", &["hat", "cap", "beanie"]),
];

const ELECTRONICS_SUBTYPES: KeywordTable = &[
    ("smartphone", &["phone", "smartphone", "iphone", "android", "mobile"]),
    ("laptop", &["laptop", "notebook", "computer"]),
    ("headphones", &["headphones", "earbuds", "earphones", "headset"]),
    ("tablet", &["tablet", "ipad"]),
    ("tv", &["tv", "television", "monitor", "screen"]),
    ("charger", &["charger", "power bank", "battery"]),
    ("speaker", &["speaker", "sound system", "audio"]),
    ("camera", &["camera", "webcam"]),
];

const TOYS_SUBTYPES: KeywordTable = &[
    ("bicycle", &["bike", "bicycle", "tricycle", "cycle"]),
    ("doll", &["doll", "action figure", "figure", "toy"]),
    ("board game", &["board game", "puzzle", "game"]),
    ("outdoor toy", &["outdoor", "playground"]),
];

const HOME_SUBTYPES: KeywordTable = &[
    (
        "furniture",
        &["furniture", "chair", "table", "desk", "sofa", "couch", "bed", "shelf"],
    ),
    (
        "kitchenware",
        &[
            "kitchenware", "utensil", "plate", "bowl", "cup", "mug", "knife", "dish", "pot", "pan",
        ],
    ),
    ("decor", &["decor", "lamp", "pillow", "blanket", "frame", "artwork"]),
    (
        "bedding",
        &["bedding", "sheets", "pillow", "duvet", "comforter", "mattress"],
    ),
];

const BEAUTY_SUBTYPES: KeywordTable = &[
    (
        "skincare",
        &["skincare", "face", "cream", "moisturizer", "serum", "lotion"],
    ),
    ("hair care", &["hair", "shampoo", "conditioner"]),
    (
        "makeup",
        &["makeup", "cosmetic", "lipstick", "mascara", "eyeshadow"],
    ),
    ("soap", &["soap", "body wash", "cleanser", "wash"]),
];

const OUTDOOR_SUBTYPES: KeywordTable = &[
    ("garden", &["garden", "plant", "pot", "flower", "soil"]),
    (
        "camping",
        &["camping", "tent", "sleeping bag", "outdoor", "hiking"],
    ),
    (
        "patio",
        &["patio", "outdoor furniture", "umbrella", "grill", "bbq"],
    ),
];

/// First product type whose keywords appear in the description
pub fn extract_product_type(description: &str) -> Option<&'static str> {
    let lower = description.to_lowercase();
    first_match(&lower, PRODUCT_KEYWORDS)
}

/// Narrow a product type to a subtype, or return the type unchanged
pub fn specific_product<'a>(product_type: &'a str, description: &str) -> &'a str {
    let table = match product_type {
        "clothing" => CLOTHING_SUBTYPES,
        "electronics" => ELECTRONICS_SUBTYPES,
        "toys" => TOYS_SUBTYPES,
        "home" => HOME_SUBTYPES,
        "beauty" => BEAUTY_SUBTYPES,
        "outdoor" => OUTDOOR_SUBTYPES,
        _ => return product_type,
    };

    let lower = description.to_lowercase();
    first_match(&lower, table).unwrap_or(product_type)
}

fn first_match(lower: &str, table: KeywordTable) -> Option<&'static str> {
    table
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(name, _)| *name)
}
