use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Question;

fn q(id: u64, level: u32, text: &str, options: [&str; 4], correct: usize, explanation: &str) -> Question {
    Question {
        id,
        ..Question::new(level, text, options, correct, explanation)
    }
}

/// Built-in question set: 18 questions covering all 11 levels.
///
/// Also the fallback source when the live bank has nothing for a level.
pub fn default_questions() -> Vec<Question> {
    vec![
        // Level 1 - Rp 500.000
        q(1, 1, "Apa ibu kota Indonesia?", ["Jakarta", "Bandung", "Surabaya", "Medan"], 0,
            "Jakarta telah menjadi ibu kota Indonesia sejak tahun 1966."),
        q(2, 1, "Planet terdekat dari Matahari adalah?", ["Venus", "Mars", "Merkurius", "Bumi"], 2,
            "Merkurius adalah planet terdekat dari Matahari dengan jarak sekitar 57,9 juta km."),
        q(3, 1, "Siapa penulis novel 'Laskar Pelangi'?",
            ["Andrea Hirata", "Dewi Lestari", "Tere Liye", "Pramoedya Ananta Toer"], 0,
            "Andrea Hirata adalah penulis novel bestseller 'Laskar Pelangi' (2005)."),
        // Level 2 - Rp 1.000.000
        q(4, 2, "Berapakah hasil dari 7 × 8 + 15 ÷ 3?", ["59", "61", "63", "65"], 1,
            "7 × 8 = 56, 15 ÷ 3 = 5, maka 56 + 5 = 61."),
        q(5, 2, "Apa nama ilmiah untuk manusia modern?",
            ["Homo sapiens", "Homo erectus", "Homo habilis", "Homo neanderthalensis"], 0,
            "Homo sapiens adalah nama ilmiah untuk manusia modern."),
        // Level 3 - Rp 2.000.000
        q(6, 3, "Di benua manakah negara Mesir berada?", ["Afrika", "Asia", "Eropa", "Australia"], 0,
            "Mesir terletak di benua Afrika (Sinai termasuk Asia)."),
        q(7, 3, "Apa simbol kimia untuk emas?", ["Ag", "Au", "Fe", "Cu"], 1,
            "Au adalah simbol kimia untuk emas (dari bahasa Latin: aurum)."),
        // Level 4 - Rp 5.000.000
        q(8, 4, "Siapakah yang menemukan teori relativitas?",
            ["Isaac Newton", "Albert Einstein", "Stephen Hawking", "Galileo Galilei"], 1,
            "Albert Einstein mengemukakan teori relativitas khusus (1905) dan umum (1915)."),
        q(9, 4, "Berapa jumlah provinsi di Indonesia saat ini?", ["34", "36", "38", "40"], 0,
            "Indonesia memiliki 34 provinsi (Papua Selatan ditambahkan 2022)."),
        // Level 5 - Rp 10.000.000 (safe zone)
        q(10, 5, "Apa nama satelit alami Bumi?", ["Phobos", "Deimos", "Bulan", "Titan"], 2,
            "Bulan adalah satu-satunya satelit alami Bumi (diameter 3.474 km)."),
        q(11, 5, "Dalam komputer, apa kepanjangan dari 'CPU'?",
            ["Central Processing Unit", "Computer Processing Unit", "Central Program Unit", "Computer Program Unit"], 0,
            "CPU adalah Central Processing Unit, otak dari komputer."),
        // Level 6 - Rp 25.000.000
        q(12, 6, "Siapakah pelukis terkenal yang memotong telinganya sendiri?",
            ["Pablo Picasso", "Vincent van Gogh", "Leonardo da Vinci", "Michelangelo"], 1,
            "Vincent van Gogh memotong sebagian telinganya pada tahun 1888."),
        q(13, 6, "Apa nama organ terbesar dalam tubuh manusia?", ["Hati", "Paru-paru", "Kulit", "Usus"], 2,
            "Kulit adalah organ terbesar dengan luas sekitar 2 meter persegi."),
        // Level 7 - Rp 50.000.000
        q(14, 7, "Apa nama sungai terpanjang di dunia?",
            ["Sungai Amazon", "Sungai Nil", "Sungai Yangtze", "Sungai Mississippi"], 1,
            "Sungai Nil di Afrika memiliki panjang sekitar 6.650 km."),
        // Level 8 - Rp 100.000.000
        q(15, 8, "Dalam fisika, partikel elementer pembawa gaya elektromagnetik disebut?",
            ["Gluon", "Foton", "Boson Higgs", "Graviton"], 1,
            "Foton adalah partikel pembawa gaya elektromagnetik dalam teori kuantum."),
        // Level 9 - Rp 250.000.000
        q(16, 9, "Siapakah penulis drama 'Romeo and Juliet'?",
            ["William Shakespeare", "Charles Dickens", "Jane Austen", "Mark Twain"], 0,
            "William Shakespeare menulis 'Romeo and Juliet' sekitar tahun 1591-1595."),
        // Level 10 - Rp 500.000.000 (safe zone)
        q(17, 10, "Lukisan 'Mona Lisa' disimpan di museum mana?",
            ["Louvre Museum", "British Museum", "Metropolitan Museum", "Vatican Museums"], 0,
            "Mona Lisa dipamerkan di Musée du Louvre, Paris sejak 1797."),
        // Level 11 - Rp 1.000.000.000 (jackpot)
        q(18, 11, "Siapakah ilmuwan yang merumuskan hukum gravitasi setelah melihat apel jatuh?",
            ["Albert Einstein", "Isaac Newton", "Galileo Galilei", "Nikola Tesla"], 1,
            "Isaac Newton merumuskan hukum gravitasi universal pada tahun 1687."),
    ]
}

/// Reads a JSON array of questions from disk, e.g. a previous export.
pub fn load_seed_file(path: &Path) -> Result<Vec<Question>> {
    tracing::info!("Loading question seed file {}", path.display());

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read question seed file {}", path.display()))?;

    let questions: Vec<Question> = serde_json::from_str(&contents)
        .context("Failed to deserialize question seed payload")?;

    tracing::info!("Seed file contains {} questions", questions.len());
    Ok(questions)
}
