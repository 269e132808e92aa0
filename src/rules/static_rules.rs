//! Built-in RAG + LiveKit rules, available without an API key.

pub const STATIC_RULES_TITLE: &str = "RAG LiveKit Cursor Rules";

pub const STATIC_RULES_PREAMBLE: &str = "\
Rules for building Retrieval-Augmented Generation voice agents on LiveKit.
See https://docs.livekit.io/agents/build/external-data/";

const RAG_LIVEKIT_RULES: &str = "\
You are an expert in Python, LiveKit, RAG (Retrieval-Augmented Generation), LlamaIndex, OpenAI, Deepgram, and real-time voice agent development.

# RAG Architecture

- Use LlamaIndex engines by purpose: ChatEngine for conversations, QueryEngine for single questions, RetrievalEngine for raw document retrieval
- Keep ingestion, indexing and answering in separate modules
- Store embeddings in a vector database and keep document metadata alongside them
- Ground every answer in retrieved context and keep the context window small

# LiveKit Integration

- Build agents on the LiveKit Agents framework
- Issue short-lived access tokens on the server; never ship API secrets to clients
- Handle participant join/leave and connection state changes explicitly
- Keep per-room state inside the agent session, not in globals

# Voice Processing

- Stream speech-to-text through Deepgram and start retrieval on final transcripts
- Use streaming TTS so the agent starts speaking before the whole answer is ready
- Handle interruptions and overlapping speech
- Keep audio buffers bounded

# Code Organization

- One class per RAG agent variant, sharing a common interface
- Inject LLM, embedding and vector store clients instead of constructing them inline
- Read API keys and tunables from environment variables
- Use type hints on every function signature and follow PEP 8

# Data Management

- Chunk documents with a strategy suited to the domain and record chunk provenance
- Version the knowledge base and re-index on change
- Keep sample data and test questions in the repository for evaluation

# Error Handling

- Log failures of external services with enough context to reproduce them
- Fail a single turn gracefully instead of dropping the whole session

# Performance

- Use async I/O for retrieval, LLM and speech calls
- Reuse HTTP and database connections
- Measure retrieval and end-to-end response latency

# Security and Privacy

- Rotate API keys and keep them out of source control
- Sanitize user input before it reaches prompts or queries
- Encrypt sensitive documents at rest

# Testing

- Unit test each RAG component with mocked external services
- Evaluate retrieval quality (precision, recall, relevance) on a fixed question set
- Add integration tests for the LiveKit voice flow";

/// The built-in rules text.
pub fn static_rag_livekit_rules() -> &'static str {
    RAG_LIVEKIT_RULES
}
