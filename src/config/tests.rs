use super::*;
use tempfile::TempDir;

#[test]
fn default_config() {
    let config = Config::default();
    assert_eq!(config.scoring.mode, SimilarityMode::Lexical);
    assert_eq!(config.scoring.similarity_weight, 0.6);
    assert_eq!(config.scoring.skill_weight, 0.4);
    assert!(!config.skills.vocabulary.is_empty());
    assert_eq!(config.ollama.protocol, "http");
    assert_eq!(config.ollama.host, "localhost");
    assert_eq!(config.ollama.port, 11434);
    assert_eq!(config.ollama.model, "nomic-embed-text:latest");
    assert_eq!(config.ollama.batch_size, 16);
}

#[test]
fn scoring_validation() {
    let config = Config::default();
    assert!(config.validate().is_ok());

    let mut invalid_config = config.clone();
    invalid_config.scoring.similarity_weight = -0.5;
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config.clone();
    invalid_config.scoring.skill_weight = f64::NAN;
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config;
    invalid_config.scoring.similarity_weight = 0.0;
    invalid_config.scoring.skill_weight = 0.0;
    assert!(invalid_config.validate().is_err());
}

#[test]
fn weights_need_not_sum_to_one() {
    let mut config = Config::default();
    config.scoring.similarity_weight = 0.9;
    config.scoring.skill_weight = 0.9;
    assert!(config.validate().is_ok());
}

#[test]
fn ollama_validation() {
    let config = Config::default();

    let mut invalid_config = config.clone();
    invalid_config.ollama.protocol = "ftp".to_string();
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config.clone();
    invalid_config.ollama.port = 0;
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config.clone();
    invalid_config.ollama.model = String::new();
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config.clone();
    invalid_config.ollama.batch_size = 0;
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config;
    invalid_config.ollama.batch_size = 1001;
    assert!(invalid_config.validate().is_err());
}

#[test]
fn blank_vocabulary_term_rejected() {
    let mut config = Config::default();
    config.skills.vocabulary.push("   ".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn empty_vocabulary_allowed() {
    // An empty vocabulary is not an error; the skill ratio is just 0.
    let mut config = Config::default();
    config.skills.vocabulary.clear();
    assert!(config.validate().is_ok());
}

#[test]
fn ollama_url_generation() {
    let config = Config::default();
    let url = config
        .ollama
        .ollama_url()
        .expect("should generate ollama_url successfully");
    assert_eq!(url.as_str(), "http://localhost:11434/");
}

#[test]
fn toml_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string(&config).expect("should serialize toml correctly");
    let parsed_config: Config = toml::from_str(&toml_str).expect("should parse toml correctly");
    assert_eq!(config, parsed_config);
}

#[test]
fn mode_parsing() {
    assert_eq!(
        "lexical".parse::<SimilarityMode>().expect("should parse"),
        SimilarityMode::Lexical
    );
    assert_eq!(
        "SEMANTIC".parse::<SimilarityMode>().expect("should parse"),
        SimilarityMode::Semantic
    );
    assert!("hybrid".parse::<SimilarityMode>().is_err());

    assert_eq!(SimilarityMode::Lexical.to_string(), "lexical");
    assert_eq!(SimilarityMode::Semantic.to_string(), "semantic");
}

#[test]
fn load_missing_config_returns_default() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config = Config::load_from(temp_dir.path()).expect("should fall back to defaults");
    assert_eq!(config, Config::default());
}

#[test]
fn save_and_load_round_trip() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let mut config = Config::default();
    config.scoring.mode = SimilarityMode::Semantic;
    config.scoring.similarity_weight = 0.7;
    config.skills.vocabulary = vec!["python".to_string(), "aws".to_string()];

    config.save_to(temp_dir.path()).expect("should save");
    let loaded = Config::load_from(temp_dir.path()).expect("should load");
    assert_eq!(config, loaded);
}

#[test]
fn setter_validation() {
    let mut config = OllamaConfig::default();

    assert!(config.set_protocol("https".to_string()).is_ok());
    assert!(config.set_host("example.com".to_string()).is_ok());
    assert!(config.set_port(8080).is_ok());
    assert!(config.set_model("new-model".to_string()).is_ok());
    assert!(config.set_batch_size(128).is_ok());

    assert!(config.set_protocol("ftp".to_string()).is_err());
    assert!(config.set_port(0).is_err());
    assert!(config.set_model(String::new()).is_err());
    assert!(config.set_batch_size(0).is_err());
    assert!(config.set_batch_size(1001).is_err());
}
