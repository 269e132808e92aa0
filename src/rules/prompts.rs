//! Prompt text for the rules generator.

/// A two-part prompt: role-setting instruction plus the task itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// A clarifying question and the user's answer (possibly blank).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clarification {
    pub question: String,
    pub answer: String,
}

const CLARIFYING_SYSTEM: &str = "\
You help developers describe their project well enough to write good coding rules for it.

Your task:
1. Read the user's project description.
2. Ask the 2-4 most important clarifying questions.
3. Focus on technical requirements, architecture, code style and anything unusual about the project.
4. Skip questions that are too generic or already answered.

Answer format: one question per line, no numbering.";

const CURSORRULES_SYSTEM: &str = "\
You are an expert at writing .cursorrules files for the Cursor IDE.

A .cursorrules file tells the AI assistant inside Cursor how to behave when working on a codebase.

Your task:
1. Analyse the user's project description.
2. Write a .cursorrules file that is as useful as possible for developing that project.
3. ALWAYS start with \"You are an expert in...\".
4. Cover the relevant recommendations for:
   - technologies and frameworks
   - code style and architecture
   - best practices
   - security
   - performance
   - testing
   - documentation

Answer format: only the .cursorrules text, no extra commentary.

Example of a good .cursorrules file:

```
You are an expert in React, Next.js, TypeScript, and modern web development.

Code Style and Structure
- Use functional components with hooks over class components
- Implement proper TypeScript types for all props and state
- Prefer named exports over default exports

Testing and Quality
- Write unit tests for all components
- Use React Testing Library for component tests
- Use ESLint and Prettier for code formatting
```";

const RAG_LIVEKIT_SYSTEM: &str = "\
You are an expert at writing .cursorrules files for the Cursor IDE, specialising in \
Retrieval-Augmented Generation (RAG) systems built on LiveKit.

Write the most useful possible .cursorrules file for a RAG + LiveKit project, based on:
1. LiveKit Agents and its external data documentation (https://docs.livekit.io/agents/build/external-data/)
2. LlamaIndex for the RAG layer
3. WebRTC voice agents

ALWAYS start with \"You are an expert in...\" and include:
- RAG practices specific to LiveKit
- LlamaIndex engines (ChatEngine, QueryEngine, RetrievalEngine)
- OpenAI and Deepgram integration
- vector database management
- voice data over WebRTC
- real-time agent patterns
- security and performance for RAG systems

Answer format: only the .cursorrules text, no extra commentary.";

/// Prompt asking for clarifying questions about `query`.
pub fn clarifying_questions_prompt(query: &str) -> Prompt {
    Prompt {
        system: CLARIFYING_SYSTEM.to_string(),
        user: format!(
            "The user described their project: {query}\n\n\
             Which clarifying questions would help understand the project well enough \
             to write good development rules?"
        ),
    }
}

/// Prompt asking for a `.cursorrules` file for `query`.
///
/// Clarifications with a blank answer are left out; the clarification block
/// is omitted entirely when nothing was answered.
pub fn cursorrules_prompt(query: &str, clarifications: &[Clarification]) -> Prompt {
    let mut context = format!("The user described their project: {query}");

    let answered: Vec<&Clarification> = clarifications
        .iter()
        .filter(|c| !c.answer.trim().is_empty())
        .collect();
    if !answered.is_empty() {
        context.push_str("\n\nAdditional clarifications:");
        for c in answered {
            context.push_str(&format!("\n- {}: {}", c.question, c.answer));
        }
    }

    Prompt {
        system: CURSORRULES_SYSTEM.to_string(),
        user: format!(
            "Create a .cursorrules file for the following project:\n\n{context}\n\n\
             Generate the most relevant and useful rules for this project."
        ),
    }
}

/// Prompt for the specialised RAG + LiveKit rules.
pub fn rag_livekit_prompt(description: &str, additional_context: &str) -> Prompt {
    Prompt {
        system: RAG_LIVEKIT_SYSTEM.to_string(),
        user: format!(
            "Create a .cursorrules file for a RAG project built on LiveKit.\n\n\
             Project description: {description}\n\n\
             Additional context:\n{additional_context}\n\n\
             The architecture includes:\n\
             - a Python voice agent on LiveKit\n\
             - a LlamaIndex RAG layer with ChatEngine, QueryEngine and RetrievalEngine\n\
             - OpenAI API integration\n\
             - Deepgram speech recognition\n\
             - WebRTC for real-time media\n\
             - vector databases for the knowledge base\n\n\
             Write the most relevant rules for developing such a system efficiently."
        ),
    }
}

/// Default description used by the `rag-livekit` command.
pub const RAG_LIVEKIT_DESCRIPTION: &str = "\
A Retrieval-Augmented Generation system on LiveKit for building voice agents, \
following the LiveKit Agents external data guide.";

/// Default additional context used by the `rag-livekit` command.
pub const RAG_LIVEKIT_CONTEXT: &str = "\
The project includes:
- a LlamaIndex chat engine RAG agent
- a LlamaIndex query engine RAG agent
- a LlamaIndex retrieval engine RAG agent
- sample domain data for retrieval
- a set of test questions
- OpenAI and Deepgram integration
- WebRTC for real-time media
- vector databases";
