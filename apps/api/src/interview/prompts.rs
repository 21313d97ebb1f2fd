// Oracle prompt templates for the interview engine.
// Placeholders in `{braces}` are substituted with `str::replace` before sending.

/// Question generation. Reply is plain text.
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"You are an expert technical interviewer. Generate ONE interview question.

Job Description:
{job_description}

Candidate Information:
- Skills: {skills}
- Domain: {primary_domain}
- Experience: {experience_years} years

Difficulty Level: {difficulty}

Past Questions Already Asked:
{past_questions}

Requirements:
- Question must be relevant to the job description
- Difficulty must match {difficulty} level:
  * EASY: Basic concepts, definitions, simple scenarios (suitable for entry-level)
  * MEDIUM: Practical applications, problem-solving, trade-offs (suitable for mid-level)
  * HARD: System design, advanced concepts, complex scenarios (suitable for senior-level)
- Do NOT repeat or rephrase past questions
- Question should be clear, specific, and focused on ONE topic
- Keep question concise (1-3 sentences)

Return ONLY the question text, no explanation, no preamble, no formatting."#;

/// Answer evaluation. Reply is `{"score": number, "feedback": string}`.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"You are evaluating a technical interview answer. Be fair but thorough.

Question: {question}
Candidate's Answer: {answer}
Difficulty Level: {difficulty}
Job Requirements: {job_description}

Evaluation Criteria:
1. Technical Accuracy (40%): Is the answer factually correct?
2. Relevance (20%): Does it directly address the question?
3. Depth (20%): Is the explanation detailed enough for the difficulty level?
4. Job Alignment (20%): Does it demonstrate skills relevant to the job?

Provide your evaluation in this EXACT JSON format:
{
    "score": <number between 0-100>,
    "feedback": "<2-3 sentences of constructive feedback>"
}

Guidelines for scoring:
- 90-100: Excellent answer, demonstrates mastery
- 70-89: Good answer, solid understanding
- 50-69: Average answer, meets minimum requirements
- 30-49: Below average, significant gaps
- 0-29: Poor answer, fundamental misunderstandings

Return ONLY the JSON object, no other text."#;

/// Final report feedback. Reply is `{"strengths": [..], "weaknesses": [..]}`.
pub const REPORT_PROMPT_TEMPLATE: &str = r#"Analyze this technical interview performance and provide actionable feedback.

Final Score: {final_score}/100
Total Questions: {total_questions}
Performance Category: {category}

Question-Answer Summary:
{qa_summary}

Provide a JSON response with:
1. Top 3 strengths demonstrated by the candidate
2. Top 3 areas needing improvement

Format:
{
    "strengths": ["strength 1", "strength 2", "strength 3"],
    "weaknesses": ["area for improvement 1", "area for improvement 2", "area for improvement 3"]
}

Be specific and constructive. Return ONLY the JSON object."#;
