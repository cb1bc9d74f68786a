//! Shared fixtures for the mocked E-utilities tests
#![allow(dead_code)]

use pubmed_fetcher::{ClientConfig, PubMedClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Two-article EFetch response: one complete article, one sparse one
pub const EFETCH_TWO_ARTICLES: &str = r#"<?xml version="1.0" ?>
<!DOCTYPE PubmedArticleSet PUBLIC "-//NLM//DTD PubMedArticle, 1st January 2025//EN" "https://dtd.nlm.nih.gov/ncbi/pubmed/out/pubmed_250101.dtd">
<PubmedArticleSet>
    <PubmedArticle>
        <MedlineCitation Status="MEDLINE" Owner="NLM">
            <PMID Version="1">31978945</PMID>
            <Article PubModel="Print-Electronic">
                <Journal>
                    <JournalIssue CitedMedium="Internet">
                        <Volume>579</Volume>
                        <Issue>7798</Issue>
                        <PubDate>
                            <Year>2020</Year>
                            <Month>03</Month>
                        </PubDate>
                    </JournalIssue>
                    <Title>Nature</Title>
                </Journal>
                <ArticleTitle>A new coronavirus associated with human respiratory disease in China.</ArticleTitle>
                <Pagination>
                    <MedlinePgn>265-269</MedlinePgn>
                </Pagination>
                <Abstract>
                    <AbstractText>Emerging infectious diseases are major threats to public health.</AbstractText>
                </Abstract>
                <AuthorList CompleteYN="Y">
                    <Author ValidYN="Y">
                        <LastName>Wu</LastName>
                        <ForeName>Fan</ForeName>
                    </Author>
                    <Author ValidYN="Y">
                        <LastName>Zhao</LastName>
                        <ForeName>Su</ForeName>
                    </Author>
                </AuthorList>
            </Article>
            <KeywordList Owner="NOTNLM">
                <Keyword>SARS-CoV-2</Keyword>
            </KeywordList>
        </MedlineCitation>
        <PubmedData>
            <ArticleIdList>
                <ArticleId IdType="pubmed">31978945</ArticleId>
                <ArticleId IdType="doi">10.1038/s41586-020-2008-3</ArticleId>
            </ArticleIdList>
        </PubmedData>
    </PubmedArticle>
    <PubmedArticle>
        <MedlineCitation Status="PubMed-not-MEDLINE" Owner="NLM">
            <PMID Version="1">33515491</PMID>
            <Article>
                <ArticleTitle>Sparse record without journal details</ArticleTitle>
            </Article>
        </MedlineCitation>
    </PubmedArticle>
</PubmedArticleSet>"#;

/// ESearch JSON body for the given ids
pub fn esearch_body(ids: &[&str]) -> String {
    serde_json::json!({
        "header": {"type": "esearch", "version": "0.3"},
        "esearchresult": {
            "count": ids.len().to_string(),
            "retmax": ids.len().to_string(),
            "retstart": "0",
            "idlist": ids,
        }
    })
    .to_string()
}

/// Client pointing at a mock server
pub fn create_mock_client(mock_server: &MockServer) -> PubMedClient {
    PubMedClient::with_config(ClientConfig::new().with_base_url(mock_server.uri()))
}

/// Mount an ESearch mock returning `ids`
pub async fn mount_esearch(mock_server: &MockServer, ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(esearch_body(ids))
                .insert_header("content-type", "application/json"),
        )
        .mount(mock_server)
        .await;
}

/// Mount an EFetch mock returning `body`
pub async fn mount_efetch(mock_server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "application/xml"),
        )
        .mount(mock_server)
        .await;
}

/// Paths of all requests the mock server has seen
pub async fn received_paths(mock_server: &MockServer) -> Vec<String> {
    mock_server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}
