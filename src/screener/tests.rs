use super::*;
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn docx(text: &str) -> Vec<u8> {
    let body: String = text
        .lines()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut buffer = Vec::new();
    {
        let mut writer = ZipWriter::new(Cursor::new(&mut buffer));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .expect("should start archive entry");
        writer
            .write_all(xml.as_bytes())
            .expect("should write document xml");
        writer.finish().expect("should finish archive");
    }
    buffer
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.skills.vocabulary = ["Python", "AWS", "Docker", "Java"]
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    config
}

#[tokio::test]
async fn ranks_the_closer_resume_first() {
    let screener = Screener::from_config(&test_config()).expect("should build screener");

    let job = Document::from_bytes(
        "job.docx",
        docx("Looking for a Python developer with AWS and Docker experience"),
    );
    let resume_a = Document::from_bytes(
        "alice.docx",
        docx("Experienced Python engineer, used Docker daily"),
    );
    let resume_b = Document::from_bytes("bob.docx", docx("Java backend developer"));

    let report = screener
        .screen(job, vec![resume_a, resume_b])
        .await
        .expect("should screen");

    assert_eq!(report.job_name, "job.docx");
    assert_eq!(report.job_skills, vec!["AWS", "Docker", "Python"]);
    assert!(report.failures.is_empty());

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].name, "alice.docx");
    assert_eq!(report.results[1].name, "bob.docx");

    let alice = &report.results[0];
    assert!((alice.components.skill_ratio - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(alice.matched_skills, vec!["Docker", "Python"]);
    assert_eq!(alice.missing_skills, vec!["AWS"]);

    let bob = &report.results[1];
    assert_eq!(bob.components.skill_ratio, 0.0);
    assert!(bob.matched_skills.is_empty());
    assert_eq!(bob.missing_skills, vec!["AWS", "Docker", "Python"]);

    // Matched and missing always partition the job skills.
    for result in &report.results {
        let mut union: Vec<&String> = result
            .matched_skills
            .iter()
            .chain(result.missing_skills.iter())
            .collect();
        union.sort();
        assert_eq!(union.len(), report.job_skills.len());
        for skill in &result.matched_skills {
            assert!(!result.missing_skills.contains(skill));
        }
    }
}

#[tokio::test]
async fn scores_are_sorted_descending() {
    let screener = Screener::from_config(&test_config()).expect("should build screener");

    let job = Document::from_bytes(
        "job.docx",
        docx("Python developer with AWS and Docker experience"),
    );
    let resumes = vec![
        Document::from_bytes("none.docx", docx("Completely unrelated text")),
        Document::from_bytes(
            "strong.docx",
            docx("Python developer with AWS and Docker experience"),
        ),
        Document::from_bytes("partial.docx", docx("Python scripting, some Docker")),
    ];

    let report = screener.screen(job, resumes).await.expect("should screen");

    assert_eq!(report.results.len(), 3);
    assert_eq!(report.results[0].name, "strong.docx");
    for pair in report.results.windows(2) {
        assert!(pair[0].components.final_score >= pair[1].components.final_score);
    }
}

#[test]
fn concurrency_floor_is_one() {
    let screener = Screener::from_config(&test_config())
        .expect("should build screener")
        .with_concurrency(0);
    assert_eq!(screener.concurrency, 1);
}

#[tokio::test]
async fn sequential_screening_matches_default_ordering() {
    let screener = Screener::from_config(&test_config())
        .expect("should build screener")
        .with_concurrency(1);

    let job = Document::from_bytes(
        "job.docx",
        docx("Python developer with AWS and Docker experience"),
    );
    let resumes = vec![
        Document::from_bytes("bob.docx", docx("Java backend developer")),
        Document::from_bytes(
            "alice.docx",
            docx("Experienced Python engineer, used Docker daily"),
        ),
    ];

    let report = screener.screen(job, resumes).await.expect("should screen");

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].name, "alice.docx");
    assert_eq!(report.results[1].name, "bob.docx");
}

#[tokio::test]
async fn unsupported_format_resume_is_scored_not_dropped() {
    let screener = Screener::from_config(&test_config()).expect("should build screener");

    let job = Document::from_bytes("job.docx", docx("Python developer wanted"));
    let resumes = vec![
        Document::from_bytes("good.docx", docx("Python developer")),
        Document::from_bytes("notes.txt", b"Python developer".to_vec()),
    ];

    let report = screener.screen(job, resumes).await.expect("should screen");

    // The .txt resume extracts to empty text and scores at the bottom,
    // but it is present in the ranking, not an error.
    assert!(report.failures.is_empty());
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].name, "good.docx");
    assert_eq!(report.results[1].name, "notes.txt");
    assert_eq!(report.results[1].components.final_score, 0.0);
}

#[tokio::test]
async fn one_corrupt_resume_does_not_abort_the_batch() {
    let screener = Screener::from_config(&test_config()).expect("should build screener");

    let job = Document::from_bytes("job.docx", docx("Python developer wanted"));
    let resumes = vec![
        Document::from_bytes("broken.pdf", vec![0x00, 0x01, 0x02]),
        Document::from_bytes("good.docx", docx("Python developer")),
    ];

    let report = screener.screen(job, resumes).await.expect("should screen");

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].name, "good.docx");

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "broken.pdf");
    assert!(!report.failures[0].reason.is_empty());
}

#[tokio::test]
async fn corrupt_job_description_is_fatal() {
    let screener = Screener::from_config(&test_config()).expect("should build screener");

    let job = Document::from_bytes("job.pdf", b"not a pdf".to_vec());
    let resume = Document::from_bytes("good.docx", docx("Python developer"));

    assert!(screener.screen(job, vec![resume]).await.is_err());
}

#[tokio::test]
async fn empty_vocabulary_means_zero_skill_ratio() {
    let mut config = Config::default();
    config.skills.vocabulary.clear();
    let screener = Screener::from_config(&config).expect("should build screener");

    let job = Document::from_bytes("job.docx", docx("Python developer wanted"));
    let resume = Document::from_bytes("good.docx", docx("Python developer"));

    let report = screener.screen(job, vec![resume]).await.expect("should screen");

    assert!(report.job_skills.is_empty());
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].components.skill_ratio, 0.0);
    assert!(report.results[0].components.similarity > 0.0);
}
