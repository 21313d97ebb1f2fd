// Oracle prompt templates for resume intelligence.
// Placeholders in `{braces}` are substituted with `str::replace` before sending.

/// Profile extraction. Reply is a `CandidateProfile` JSON object.
pub const PROFILE_PROMPT_TEMPLATE: &str = r#"Analyze the following candidate information and extract structured data in JSON format.
The input can be a resume, PDF content, or a personal description about the candidate.

Candidate Information:
{resume_text}

Extract and return ONLY a valid JSON object with this exact structure:
{
    "skills": ["skill1", "skill2", ...],
    "experience_years": <number>,
    "projects": ["project1", "project2", ...],
    "primary_domain": "domain name"
}

Rules:
- skills: List all technical and professional skills mentioned (extract from any format)
- experience_years: Calculate total years of experience (estimate if needed, default to 0 if unclear)
- projects: List major projects mentioned (or empty array if none)
- primary_domain: Primary field/domain (e.g., "Web Development", "Data Science", "Backend Engineering", "DevOps", etc.)

Return ONLY the JSON object, no explanation or markdown formatting."#;

/// Resume / job description compatibility. Reply is a `MatchReport` JSON object.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Analyze the compatibility between a candidate's resume and a job description.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Candidate Profile:
- Skills: {skills}
- Experience: {experience_years} years
- Domain: {primary_domain}

Provide a detailed JSON analysis with:

{
    "ats_score": <0-100 number>,
    "overall_match": <0-100 number>,
    "skill_match_percentage": <0-100 number>,
    "matched_skills": ["skill1", "skill2", ...],
    "missing_skills": ["skill1", "skill2", ...],
    "matched_requirements": ["req1", "req2", ...],
    "unmet_requirements": ["req1", "req2", ...],
    "experience_match": "Suitable" | "Under-experienced" | "Over-qualified",
    "summary": "Brief assessment of fit",
    "strengths": ["strength1", "strength2"],
    "gaps": ["gap1", "gap2"],
    "recommendations": ["suggestion1", "suggestion2"]
}

ATS Score: How well the resume will pass ATS screening (0-100)
Overall Match: How well candidate matches the job (0-100)
Skill Match: Percentage of job-required skills the candidate has
Experience Match: Whether experience level aligns with job level

Return ONLY the JSON object."#;

/// Resume rewrite. Reply is plain text.
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer. Rewrite the following resume to better match the job description while keeping all factual information accurate.

ORIGINAL RESUME:
{resume_text}

TARGET JOB DESCRIPTION:
{job_description}
{focus_areas}

INSTRUCTIONS:
1. Keep all factual information accurate - only rephrase and reorganize
2. Highlight relevant skills that match the job
3. Use keywords from the job description naturally
4. Improve ATS optimization (use bullets, clear sections)
5. Emphasize experience relevant to the job
6. Make achievements more impactful
7. Maintain professional formatting
8. Add missing section headers if needed (Skills, Projects, etc.)

Return the rewritten resume ONLY - no explanations or commentary."#;
